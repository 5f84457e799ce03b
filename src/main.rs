//! Campus Plant Map Frontend Entry Point

mod app;
mod bindings;
mod components;
mod context;
mod markdown;
mod store;

use app::App;
use bindings::{alert, fetch_config, AMapSurface, BrowserStorage};
use context::Session;
use leptos::prelude::*;

/// Id of the map container in index.html
const MAP_CONTAINER: &str = "map";

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    console_log::init_with_level(level).ok();

    wasm_bindgen_futures::spawn_local(async {
        let config = fetch_config().await;
        let surface = match AMapSurface::new(MAP_CONTAINER, &config.map) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("map SDK unavailable: {:?}", e);
                alert("The map failed to load. Check the network connection and reload the page.");
                return;
            }
        };
        let session = Session::new(config, BrowserStorage::open(), surface);
        mount_to_body(move || view! { <App session=session /> });
    });
}
