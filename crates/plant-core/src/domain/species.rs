//! Species Defaults
//!
//! Shared metadata keyed by species name. Records fall back to it for any
//! field they leave empty.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::entity::{non_empty, Entity};
use super::record::SeasonDates;
use crate::overlay::{resolve_anchor, resolve_icon, AnchorRatio};

/// Characters `encodeURIComponent` leaves alone
pub(crate) const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDefault {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub season: SeasonDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Horizontal anchor ratio within the icon, 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f64>,
    /// Vertical anchor ratio within the icon, 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f64>,
    /// Markdown document describing the species
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_path: Option<String>,
}

impl SpeciesDefault {
    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.icon)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

impl Entity for SpeciesDefault {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.name.clone()
    }
}

/// Form input for a user-defined species
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesDraft {
    pub name: String,
    pub season: SeasonDates,
    pub description: String,
}

/// Metadata copied onto a new record at creation time
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpecies {
    pub description: Option<String>,
    pub season: SeasonDates,
    pub icon: String,
}

/// In-memory species mapping, explicitly owned by the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesCatalog {
    entries: BTreeMap<String, SpeciesDefault>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&SpeciesDefault> {
        self.entries.get(name)
    }

    /// Insert or replace by name. Unnamed entries are ignored.
    pub fn insert(&mut self, species: SpeciesDefault) {
        if species.name.trim().is_empty() {
            return;
        }
        self.entries.insert(species.name.clone(), species);
    }

    /// Overlay `other` on top: same-named entries are replaced
    pub fn merge(&mut self, other: BTreeMap<String, SpeciesDefault>) {
        for (name, mut species) in other {
            if species.name.is_empty() {
                species.name = name;
            }
            self.insert(species);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn icon_for(&self, name: &str, explicit: Option<&str>, fallback: &str) -> String {
        resolve_icon(explicit, self.get(name), fallback).to_string()
    }

    pub fn anchor_for(&self, name: &str, default: AnchorRatio) -> AnchorRatio {
        resolve_anchor(self.get(name), default)
    }

    /// Species metadata for a new record; missing pieces stay empty
    pub fn resolve(&self, name: &str, fallback_icon: &str) -> ResolvedSpecies {
        let species = self.get(name);
        ResolvedSpecies {
            description: species.and_then(|s| s.description()).map(str::to_string),
            season: species.map(|s| s.season.clone()).unwrap_or_default(),
            icon: resolve_icon(None, species, fallback_icon).to_string(),
        }
    }

    /// Location of the species' Markdown document
    pub fn doc_path(&self, name: &str, docs_dir: &str) -> String {
        self.get(name)
            .and_then(|s| non_empty(&s.doc_path))
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!("{}{}.md", docs_dir, utf8_percent_encode(name, URI_COMPONENT))
            })
    }
}
