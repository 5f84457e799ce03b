//! Species Document Component
//!
//! Fetches and renders the Markdown introduction of a species.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::bindings::fetch_doc;
use crate::context::use_app_context;
use crate::markdown::{missing_doc_html, parse_markdown};

#[component]
pub fn SpeciesDoc(name: String) -> impl IntoView {
    let ctx = use_app_context();
    let (html, set_html) = signal::<Option<String>>(None);

    let path = ctx.with(|s| s.species().doc_path(&name, &s.config().catalog.docs_dir));
    Effect::new(move |_| {
        let path = path.clone();
        let name = name.clone();
        spawn_local(async move {
            let rendered = match fetch_doc(&path).await {
                Ok(markdown) => parse_markdown(&markdown),
                Err(e) => {
                    log::warn!("no species document for {}: {}", name, e);
                    missing_doc_html(&name)
                }
            };
            set_html.set(Some(rendered));
        });
    });

    view! {
        <section class="species-doc">
            <h3>"About this species"</h3>
            {move || match html.get() {
                Some(content) => view! { <div class="markdown-content" inner_html=content></div> }.into_any(),
                None => view! { <p class="hint">"Loading introduction..."</p> }.into_any(),
            }}
        </section>
    }
}
