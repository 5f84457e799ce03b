//! Browser Bindings
//!
//! Everything that talks to the page: the AMap SDK, local storage, HTTP
//! fetches and native dialogs, organized by concern.

mod amap;
mod catalog;
mod dialog;
mod download;
mod storage;

pub use amap::AMapSurface;
pub use catalog::{fetch_config, fetch_doc, HttpCatalog};
pub use dialog::alert;
pub use download::{download_text, open_in_new_tab};
pub use storage::BrowserStorage;
