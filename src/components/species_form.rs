//! Species Form Component
//!
//! Defines a new species with optional bloom/leaf dates and a description.

use leptos::prelude::*;

use plant_core::domain::{SeasonDates, SpeciesDraft};

use crate::context::use_app_context;

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[component]
pub fn SpeciesForm(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let (name, set_name) = signal(String::new());
    let (bloom_start, set_bloom_start) = signal(String::new());
    let (bloom_end, set_bloom_end) = signal(String::new());
    let (leaf_start, set_leaf_start) = signal(String::new());
    let (leaf_end, set_leaf_end) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = SpeciesDraft {
            name: name.get(),
            season: SeasonDates {
                bloom_start: optional(bloom_start.get()),
                bloom_end: optional(bloom_end.get()),
                leaf_start: optional(leaf_start.get()),
                leaf_end: optional(leaf_end.get()),
            },
            description: description.get(),
        };
        if ctx.try_update(|s| s.add_species(draft)).is_some() {
            on_done.run(());
        }
    };

    let date_input = move |label: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <label class="field small">
                <span>{label}</span>
                <input
                    type="text"
                    placeholder="MM-DD"
                    prop:value=move || value.get()
                    on:input=move |ev| set.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <form class="species-form" on:submit=save>
            <label class="field">
                <span>"Name"</span>
                <input
                    type="text"
                    placeholder="e.g. Cherry blossom"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>
            <div class="date-row">
                {date_input("Bloom from", bloom_start, set_bloom_start)}
                {date_input("Bloom until", bloom_end, set_bloom_end)}
            </div>
            <div class="date-row">
                {date_input("Leaf change from", leaf_start, set_leaf_start)}
                {date_input("Leaf change until", leaf_end, set_leaf_end)}
            </div>
            <label class="field">
                <span>"Description"</span>
                <textarea
                    rows="3"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
            </label>
            <div class="form-actions">
                <button type="submit" class="btn primary">"Save species"</button>
                <button type="button" class="btn" on:click=move |_| on_done.run(())>"Cancel"</button>
            </div>
        </form>
    }
}
