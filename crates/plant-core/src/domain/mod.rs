//! Domain Layer
//!
//! Plant records, species defaults and the geometry they carry.
//! Pure data plus the resolution rules between records and species.

mod entity;
mod geometry;
mod record;
mod species;

pub use entity::{non_empty, Entity};
pub use geometry::{Geometry, LngLat, PlantKind};
pub use record::{PlantId, PlantRecord, SeasonDates};
pub use species::{ResolvedSpecies, SpeciesCatalog, SpeciesDefault, SpeciesDraft};
pub(crate) use species::URI_COMPONENT;
