//! Delete Plant Button
//!
//! Two-step removal of a local record. Clicks never reach the card behind
//! it, so deleting does not also focus the map.

use leptos::prelude::*;

use plant_core::domain::PlantId;

use crate::context::use_app_context;

#[component]
pub fn DeletePlantButton(id: PlantId, name: String) -> impl IntoView {
    let ctx = use_app_context();
    let (armed, set_armed) = signal(false);

    let delete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(false);
        let removed = ctx.update(|s| s.delete_plant(&id)).flatten();
        match removed {
            Some(record) => {
                log::info!("deleted plant {}", record.id);
                if ctx.selected_plant.get_untracked().as_ref() == Some(&record.id) {
                    ctx.select_plant(None);
                }
            }
            None => log::warn!("plant {} was already gone", id),
        }
    };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    title="Delete this record"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        set_armed.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm" title=format!("Delete {}?", name)>
                <button class="confirm-btn" on:click=delete.clone()>"✓"</button>
                <button
                    class="cancel-btn"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        set_armed.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
