//! Campus Plant Map App
//!
//! Side panel layout next to the map. Map events are forwarded into the
//! session; the store mirrors it for the views.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use plant_core::session::fetch_catalogs;

use crate::bindings::HttpCatalog;
use crate::components::{ControlPanel, DetailPanel, LocalList, SubmissionDialog};
use crate::context::{AppContext, Session};
use crate::store::{store_mark_loaded, store_sync, AppState};

#[component]
pub fn App(session: Session) -> impl IntoView {
    let store = Store::new(AppState::default());
    store_sync(&store, &session);
    let session = StoredValue::new_local(session);

    let ctx = AppContext::new(session, store, signal(None), signal(false));
    provide_context(store);
    provide_context(ctx);

    // Map events run after the SDK callback returns
    ctx.with(|s| {
        let surface = s.surface();
        surface.set_on_select(move |id| ctx.select_plant(Some(id)));
        surface.on_click(move |position| {
            spawn_local(async move {
                ctx.update(|s| s.map_click(position));
            });
        });
        surface.on_zoom_change(move || {
            spawn_local(async move {
                ctx.update(|s| s.zoom_changed());
            });
        });
    });

    // Load species and bundled plants once
    spawn_local(async move {
        let paths = ctx.with(|s| s.config().catalog.clone());
        let fetched = fetch_catalogs(&HttpCatalog, &paths).await;
        ctx.update(|s| s.apply_fetched(fetched));
        store_mark_loaded(&store);
    });

    view! {
        <div class="side-panel">
            <h1>"Campus Plant Map"</h1>
            <ControlPanel />
            <LocalList />
        </div>
        <DetailPanel />
        <SubmissionDialog />
    }
}
