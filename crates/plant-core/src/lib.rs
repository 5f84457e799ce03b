//! Campus Plant Map Core
//!
//! Layered architecture:
//! - domain: plant records, species defaults, geometry
//! - season: month-range classification for bloom/leaf periods
//! - repository: key-value persistence and the record store
//! - overlay: live map objects mirroring the stored records
//! - session: interaction modes, startup catalog loading, species management
//! - export: issue/JSON hand-off of locally collected records
//!
//! Nothing in here touches the browser directly. The map SDK, local storage
//! and network fetches are reached through the `MapSurface`, `KvStore` and
//! `CatalogSource` traits.

pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod overlay;
pub mod repository;
pub mod season;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use error::{PlantError, PlantResult, StorageError, ValidationError};
