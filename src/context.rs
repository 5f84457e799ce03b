//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use plant_core::domain::PlantId;
use plant_core::session::AnnotationSession;
use plant_core::PlantResult;

use crate::bindings::{alert, AMapSurface, BrowserStorage};
use crate::store::{store_sync, AppStore};

/// The one session of this page
pub type Session = AnnotationSession<BrowserStorage, AMapSurface>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    session: StoredValue<Session, LocalStorage>,
    store: AppStore,
    /// Record shown in the detail panel - read
    pub selected_plant: ReadSignal<Option<PlantId>>,
    /// Record shown in the detail panel - write
    set_selected_plant: WriteSignal<Option<PlantId>>,
    /// Whether the submission dialog is open - read
    pub submission_open: ReadSignal<bool>,
    /// Whether the submission dialog is open - write
    set_submission_open: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        session: StoredValue<Session, LocalStorage>,
        store: AppStore,
        selected_plant: (ReadSignal<Option<PlantId>>, WriteSignal<Option<PlantId>>),
        submission_open: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            session,
            store,
            selected_plant: selected_plant.0,
            set_selected_plant: selected_plant.1,
            submission_open: submission_open.0,
            set_submission_open: submission_open.1,
        }
    }

    /// Read the session
    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.session.with_value(f)
    }

    /// Mutate the session, then refresh the store from it.
    /// Returns `None` once the app has been torn down.
    pub fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let result = self.session.try_update_value(f)?;
        self.session.with_value(|session| store_sync(&self.store, session));
        Some(result)
    }

    /// `update` for fallible operations: errors are logged and shown to the
    /// user, and `None` is returned
    pub fn try_update<T>(&self, f: impl FnOnce(&mut Session) -> PlantResult<T>) -> Option<T> {
        match self.update(f)? {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("{}", e);
                alert(&e.to_string());
                None
            }
        }
    }

    pub fn select_plant(&self, id: Option<PlantId>) {
        self.set_selected_plant.set(id);
    }

    /// Show the submission dialog
    pub fn set_submission_open(&self, open: bool) {
        self.set_submission_open.set(open);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
