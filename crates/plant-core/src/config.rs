//! Application Configuration
//!
//! Defaults match the bundled campus dataset. A `data/config.json` may
//! override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::domain::LngLat;
use crate::overlay::AnchorRatio;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub map: MapConfig,
    pub storage: StorageKeys,
    pub catalog: CatalogPaths,
    /// Icon used when neither the record nor its species has one
    pub fallback_icon: String,
    pub default_anchor: AnchorRatio,
    /// Name list entry used when nothing else is known
    pub unnamed_species: String,
    pub submission: SubmissionTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            storage: StorageKeys::default(),
            catalog: CatalogPaths::default(),
            fallback_icon: "images/tree.png".to_string(),
            default_anchor: AnchorRatio::DEFAULT,
            unnamed_species: "Unnamed plant".to_string(),
            submission: SubmissionTarget::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config document, falling back to defaults when it is malformed
    pub fn from_json_or_default(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed config: {}", e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub center: LngLat,
    pub zoom: f64,
    /// Zoom used when jumping to a single plant from the list
    pub point_focus_zoom: f64,
    /// Zoom used when jumping to an area centroid
    pub area_focus_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LngLat::new(118.9067, 32.1014),
            zoom: 17.0,
            point_focus_zoom: 18.0,
            area_focus_zoom: 17.0,
        }
    }
}

/// The three independent persistence keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub plants: String,
    pub species_names: String,
    pub species_defaults: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            plants: "campus_plant_local".to_string(),
            species_names: "campus_plant_species".to_string(),
            species_defaults: "campus_plant_species_defaults".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogPaths {
    pub species: String,
    pub plants: String,
    pub docs_dir: String,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            species: "data/species.json".to_string(),
            plants: "data/plants.json".to_string(),
            docs_dir: "data/plant-docs/".to_string(),
        }
    }
}

/// Repository receiving issue-based submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionTarget {
    pub owner: String,
    pub repo: String,
    pub label: String,
}

impl Default for SubmissionTarget {
    fn default() -> Self {
        Self {
            owner: "iceinke".to_string(),
            repo: "campus-plants-map".to_string(),
            label: "data-submission".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_json_or_default(
            r#"{"map": {"zoom": 15}, "fallbackIcon": "images/leaf.png"}"#,
        );
        assert_eq!(config.map.zoom, 15.0);
        assert_eq!(config.map.point_focus_zoom, 18.0);
        assert_eq!(config.fallback_icon, "images/leaf.png");
        assert_eq!(config.storage.plants, "campus_plant_local");
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let config = AppConfig::from_json_or_default("{not json");
        assert_eq!(config, AppConfig::default());
    }
}
