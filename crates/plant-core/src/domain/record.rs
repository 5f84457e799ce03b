//! Plant Record Entity
//!
//! A persisted plant annotation: a single specimen (point) or a planted
//! area (polygon) plus its seasonal metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{non_empty, Entity};
use super::geometry::{Geometry, LngLat, PlantKind};
use crate::season::DateRange;

/// Opaque record identifier, stable for the record's lifetime
///
/// Legacy data stored millisecond timestamps as numbers; those are read as
/// their decimal string so comparisons stay exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct PlantId(String);

impl PlantId {
    /// Fresh collision-resistant id for a user-created record
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PlantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for PlantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Float(f64),
}

impl From<RawId> for PlantId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => PlantId(s),
            RawId::Unsigned(n) => PlantId(n.to_string()),
            RawId::Float(f) => PlantId(f.to_string()),
        }
    }
}

/// Bloom and leaf-change date strings shared by records and species defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_end: Option<String>,
}

impl SeasonDates {
    pub fn bloom(&self) -> DateRange<'_> {
        DateRange::new(non_empty(&self.bloom_start), non_empty(&self.bloom_end))
    }

    pub fn leaf(&self) -> DateRange<'_> {
        DateRange::new(non_empty(&self.leaf_start), non_empty(&self.leaf_end))
    }

    /// Field-wise merge: own non-empty values win, gaps come from `fallback`
    pub fn or(&self, fallback: &SeasonDates) -> SeasonDates {
        fn pick(own: &Option<String>, other: &Option<String>) -> Option<String> {
            non_empty(own).or_else(|| non_empty(other)).map(str::to_string)
        }
        SeasonDates {
            bloom_start: pick(&self.bloom_start, &fallback.bloom_start),
            bloom_end: pick(&self.bloom_end, &fallback.bloom_end),
            leaf_start: pick(&self.leaf_start, &fallback.leaf_start),
            leaf_end: pick(&self.leaf_end, &fallback.leaf_end),
        }
    }
}

/// A plant annotation. Never mutated once stored; edits are delete + re-add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    /// Bundled catalog entries may omit it; the loader assigns one
    #[serde(default)]
    pub id: PlantId,
    /// Species label, free text
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub season: SeasonDates,
    /// Explicit icon URL, overrides the species icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PlantRecord {
    pub fn new(id: PlantId, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
            description: None,
            season: SeasonDates::default(),
            icon: None,
        }
    }

    pub fn point(id: PlantId, name: impl Into<String>, position: LngLat) -> Self {
        Self::new(id, name, Geometry::Point { position })
    }

    pub fn area(id: PlantId, name: impl Into<String>, path: Vec<LngLat>) -> Self {
        Self::new(id, name, Geometry::Area { path })
    }

    pub fn kind(&self) -> PlantKind {
        self.geometry.kind()
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.icon)
    }
}

impl Entity for PlantRecord {
    type Id = PlantId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
