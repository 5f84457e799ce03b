//! Global Application State Store
//!
//! A reactive mirror of the session, refreshed after every mutation. Uses
//! Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use plant_core::domain::PlantRecord;
use plant_core::session::ControlState;

use crate::context::Session;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Locally created plants, newest first
    pub local_plants: Vec<PlantRecord>,
    /// Species selector entries
    pub species_names: Vec<String>,
    pub selected_species: Option<String>,
    /// Mode control enablement
    pub controls: ControlState,
    /// Whether the "hide all" toggle is active
    pub overlays_hidden: bool,
    /// Set once both startup fetches have finished
    pub catalogs_loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy everything the views read out of the session
pub fn store_sync(store: &AppStore, session: &Session) {
    let mut plants = session.local_plants().to_vec();
    plants.reverse();
    *store.local_plants().write() = plants;
    *store.species_names().write() = session.species_names().to_vec();
    *store.selected_species().write() = session.selected_species().map(str::to_string);
    *store.controls().write() = session.controls();
    *store.overlays_hidden().write() = session.overlays().all_hidden();
}

pub fn store_mark_loaded(store: &AppStore) {
    *store.catalogs_loaded().write() = true;
}
