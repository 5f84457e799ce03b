//! Local Plant List Component
//!
//! Plants created on this device, newest first. Clicking a card focuses the
//! map on it and opens the detail panel.

use leptos::prelude::*;

use plant_core::domain::PlantRecord;
use plant_core::overlay::InfoContent;

use crate::components::{DeletePlantButton, MonthBar};
use crate::context::{use_app_context, AppContext};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LocalList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="local-list">
            <h2>{move || format!("My records ({})", store.local_plants().read().len())}</h2>
            <Show
                when=move || !store.local_plants().read().is_empty()
                fallback=|| view! { <p class="hint">"No local records yet."</p> }
            >
                <For
                    each=move || store.local_plants().get()
                    key=|record| record.id.clone()
                    let:record
                >
                    <PlantCard record=record />
                </For>
            </Show>
        </section>
    }
}

#[component]
fn PlantCard(record: PlantRecord) -> impl IntoView {
    let ctx: AppContext = use_app_context();
    let (icon, info) = ctx.with(|s| {
        let fallback = &s.config().fallback_icon;
        let icon = s.species().icon_for(&record.name, record.icon(), fallback);
        (icon, InfoContent::for_record(&record, s.species().get(&record.name)))
    });

    let id = record.id.clone();
    let focus_id = id.clone();
    let is_selected = move || ctx.selected_plant.get().as_ref() == Some(&id);
    let on_click = move |_: web_sys::MouseEvent| {
        ctx.with(|s| {
            s.focus_plant(&focus_id);
        });
        ctx.select_plant(Some(focus_id.clone()));
    };

    view! {
        <div
            class=move || if is_selected() { "plant-card selected" } else { "plant-card" }
            on:click=on_click
        >
            <img class="plant-card-icon" src=icon alt="" />
            <div class="plant-card-body">
                <div class="plant-card-title">
                    <span class="plant-name">{record.name.clone()}</span>
                    <span class="kind-tag">{record.kind().label()}</span>
                </div>
                <div class="plant-desc">
                    {info.description.clone().unwrap_or_else(|| "No description yet".to_string())}
                </div>
                <MonthBar calendar=info.calendar />
            </div>
            <DeletePlantButton id=record.id.clone() name=record.name.clone() />
        </div>
    }
}
