//! Detail Panel Component
//!
//! Everything known about the selected record, followed by its species
//! document.

use leptos::prelude::*;

use plant_core::domain::{Geometry, PlantRecord};
use plant_core::overlay::InfoContent;

use crate::components::{DeletePlantButton, MonthBar, SpeciesDoc};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

struct Detail {
    record: PlantRecord,
    icon: String,
    info: InfoContent,
    local: bool,
}

fn location_text(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point { position } => format!("{:.6}, {:.6}", position.lng, position.lat),
        Geometry::Area { path } => format!("{} vertices", path.len()),
    }
}

#[component]
pub fn DetailPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let detail = move || {
        // re-read after deletions and catalog loads
        store.local_plants().track();
        store.catalogs_loaded().track();
        let id = ctx.selected_plant.get()?;
        ctx.with(|s| {
            let record = s.find_plant(&id)?.clone();
            let species = s.species().get(&record.name);
            Some(Detail {
                icon: s.species().icon_for(&record.name, record.icon(), &s.config().fallback_icon),
                info: InfoContent::for_record(&record, species),
                local: s.is_local(&id),
                record,
            })
        })
    };

    view! {
        {move || detail().map(|d| {
            let bloom = d.info.season.bloom();
            let leaf = d.info.season.leaf();
            let bloom_text = if bloom.is_empty() { "Not recorded".to_string() } else { bloom.describe() };
            let leaf_text = if leaf.is_empty() { "Not recorded".to_string() } else { leaf.describe() };
            view! {
                <aside class="detail-panel">
                    <header class="detail-header">
                        <img class="detail-icon" src=d.icon alt="" />
                        <div>
                            <h2>{d.record.name.clone()}</h2>
                            <span class="kind-tag">{d.record.kind().label()}</span>
                            {(!d.local).then(|| view! { <span class="kind-tag muted">"Catalog"</span> })}
                        </div>
                        {d.local.then(|| view! {
                            <DeletePlantButton id=d.record.id.clone() name=d.record.name.clone() />
                        })}
                        <button class="close-btn" on:click=move |_| ctx.select_plant(None)>"×"</button>
                    </header>
                    <p class="plant-desc">
                        {d.info.description.clone().unwrap_or_else(|| "No description yet".to_string())}
                    </p>
                    <dl class="detail-fields">
                        <dt>"Bloom"</dt>
                        <dd>{bloom_text}</dd>
                        <dt>"Leaf change"</dt>
                        <dd>{leaf_text}</dd>
                        <dt>"Location"</dt>
                        <dd>{location_text(&d.record.geometry)}</dd>
                    </dl>
                    <MonthBar calendar=d.info.calendar legend=true />
                    <SpeciesDoc name=d.record.name.clone() />
                </aside>
            }
        })}
    }
}
