//! Geometry
//!
//! Coordinates are serialized as `[lng, lat]` arrays, the shape used by the
//! bundled data files and by the map SDK.

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

/// Record kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    Point,
    Area,
}

impl PlantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantKind::Point => "point",
            PlantKind::Area => "area",
        }
    }

    /// Short label for list cards and detail panels
    pub fn label(&self) -> &'static str {
        match self {
            PlantKind::Point => "Single plant",
            PlantKind::Area => "Planted area",
        }
    }
}

/// Where a record sits on the map, tagged by `type` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Point { position: LngLat },
    /// Polygon ring, not required to be closed
    Area { path: Vec<LngLat> },
}

impl Geometry {
    pub fn kind(&self) -> PlantKind {
        match self {
            Geometry::Point { .. } => PlantKind::Point,
            Geometry::Area { .. } => PlantKind::Area,
        }
    }

    /// Arithmetic mean of all vertices; the position itself for points
    pub fn centroid(&self) -> Option<LngLat> {
        match self {
            Geometry::Point { position } => Some(*position),
            Geometry::Area { path } => {
                if path.is_empty() {
                    return None;
                }
                let n = path.len() as f64;
                let (lng, lat) = path
                    .iter()
                    .fold((0.0, 0.0), |(x, y), p| (x + p.lng, y + p.lat));
                Some(LngLat::new(lng / n, lat / n))
            }
        }
    }
}
