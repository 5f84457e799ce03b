//! Control Panel Component
//!
//! Species selector and the mode buttons. Enablement comes straight from
//! the session's `ControlState`.

use leptos::prelude::*;

use plant_core::session::ADD_SPECIES_SENTINEL;

use crate::bindings::alert;
use crate::components::SpeciesForm;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ControlPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (adding_species, set_adding_species) = signal(false);

    let controls = move || store.controls().get();

    let on_species_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_adding_species.set(value == ADD_SPECIES_SENTINEL);
        ctx.update(|s| s.select_species(&value));
    };

    let on_place = move |_: web_sys::MouseEvent| {
        if controls().place_confirms {
            if let Some(id) = ctx.try_update(|s| s.confirm_placement()) {
                ctx.select_plant(Some(id));
            }
        } else {
            ctx.try_update(|s| s.start_placing());
        }
    };

    let on_finish = move |_: web_sys::MouseEvent| {
        if let Some(id) = ctx.try_update(|s| s.finish_area()) {
            ctx.select_plant(Some(id));
        }
    };

    let on_submit = move |_: web_sys::MouseEvent| {
        if store.local_plants().read().is_empty() {
            alert("There are no local plant records to submit yet.");
        } else {
            ctx.set_submission_open(true);
        }
    };

    view! {
        <section class="control-panel">
            <label class="field">
                <span>"Species"</span>
                <select
                    prop:value=move || {
                        if adding_species.get() {
                            ADD_SPECIES_SENTINEL.to_string()
                        } else {
                            store.selected_species().get().unwrap_or_default()
                        }
                    }
                    on:change=on_species_change
                >
                    <option value="">"Select a species..."</option>
                    <For
                        each=move || store.species_names().get()
                        key=|name| name.clone()
                        let:name
                    >
                        <option value=name.clone()>{name.clone()}</option>
                    </For>
                    <option value=ADD_SPECIES_SENTINEL>"+ Add new species"</option>
                </select>
            </label>

            <Show when=move || adding_species.get()>
                <SpeciesForm on_done=Callback::new(move |_| set_adding_species.set(false)) />
            </Show>

            <div class="mode-buttons">
                <button
                    class=move || if controls().place_confirms { "btn primary active" } else { "btn primary" }
                    disabled=move || !controls().place_enabled
                    on:click=on_place
                >
                    {move || if controls().place_confirms { "Confirm position" } else { "Add plant" }}
                </button>
                <button
                    class="btn"
                    disabled=move || !controls().area_enabled
                    on:click=move |_| { ctx.try_update(|s| s.start_area()); }
                >
                    "Draw area"
                </button>
                <button
                    class="btn"
                    disabled=move || !controls().finish_enabled
                    on:click=on_finish
                >
                    {move || format!("Finish area ({} points)", controls().vertex_count)}
                </button>
                <button
                    class="btn"
                    disabled=move || !controls().cancel_enabled
                    on:click=move |_| { ctx.update(|s| s.cancel()); }
                >
                    "Cancel"
                </button>
            </div>

            <div class="panel-actions">
                <button
                    class="btn"
                    disabled=move || !controls().toggle_enabled
                    on:click=move |_| { ctx.update(|s| s.toggle_all_overlays()); }
                >
                    {move || if store.overlays_hidden().get() { "Show all markers" } else { "Hide all markers" }}
                </button>
                <button class="btn" on:click=on_submit>"Submit data"</button>
            </div>

            <Show when=move || !store.catalogs_loaded().get()>
                <p class="hint">"Loading plant catalog..."</p>
            </Show>
        </section>
    }
}
