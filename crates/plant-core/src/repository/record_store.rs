//! Record Store
//!
//! Plant records, species defaults and the species-name list, each under its
//! own persistence key. Reads of missing or corrupt data return empty
//! collections; failed writes are logged and the in-memory copy stays
//! authoritative for the session.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv::KvStore;
use crate::config::StorageKeys;
use crate::domain::{Entity, PlantId, PlantRecord, SpeciesDefault};
use crate::error::{PlantError, PlantResult};

pub struct RecordStore<S: KvStore> {
    kv: S,
    keys: StorageKeys,
    /// Session copy of the persisted plants
    plants: Vec<PlantRecord>,
    /// Session copy of the user-defined species
    species_defaults: BTreeMap<String, SpeciesDefault>,
    /// Session copy of the species-name list
    species_names: Vec<String>,
}

impl<S: KvStore> RecordStore<S> {
    /// Open the store and read every persisted collection into memory
    pub fn open(kv: S, keys: StorageKeys) -> Self {
        let mut store = Self {
            kv,
            keys,
            plants: Vec::new(),
            species_defaults: BTreeMap::new(),
            species_names: Vec::new(),
        };
        store.plants = store.load_plants();
        store.species_defaults = store.load_species_defaults();
        store.species_names = store.load_species_names();
        store
    }

    /// Persisted plants as of the last mutation in this session
    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn find_plant(&self, id: &PlantId) -> Option<&PlantRecord> {
        self.plants.iter().find(|p| &p.id == id)
    }

    /// User-defined species as of the last mutation in this session
    pub fn species_defaults(&self) -> &BTreeMap<String, SpeciesDefault> {
        &self.species_defaults
    }

    /// Species names as of the last mutation in this session
    pub fn species_names(&self) -> &[String] {
        &self.species_names
    }

    // ========================
    // Plant Records
    // ========================

    /// Stored plants. Entries that do not match the record shape are
    /// skipped one by one so a single bad entry cannot hide the rest.
    pub fn load_plants(&self) -> Vec<PlantRecord> {
        let entries: Vec<serde_json::Value> = self.read_json(&self.keys.plants).unwrap_or_default();
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("skipping stored plant #{}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    /// Overwrite the stored collection wholesale
    pub fn save_plants(&self, records: &[PlantRecord]) {
        if let Err(e) = self.write_json(&self.keys.plants, &records) {
            log::error!("failed to save local plants: {}", e);
        }
    }

    pub fn append_plant(&mut self, record: PlantRecord) {
        self.plants.push(record);
        self.save_plants(&self.plants);
    }

    /// Remove the record with `id`; returns it when present
    pub fn remove_plant(&mut self, id: &PlantId) -> Option<PlantRecord> {
        let removed = remove_by_id(&mut self.plants, id)?;
        self.save_plants(&self.plants);
        Some(removed)
    }

    // ========================
    // Species Defaults
    // ========================

    pub fn load_species_defaults(&self) -> BTreeMap<String, SpeciesDefault> {
        self.read_json(&self.keys.species_defaults).unwrap_or_default()
    }

    pub fn save_species_defaults(&self, defaults: &BTreeMap<String, SpeciesDefault>) {
        if let Err(e) = self.write_json(&self.keys.species_defaults, defaults) {
            log::error!("failed to save species defaults: {}", e);
        }
    }

    /// Insert or replace a single user-defined species
    pub fn upsert_species_default(&mut self, species: SpeciesDefault) {
        self.species_defaults.insert(species.id(), species);
        self.save_species_defaults(&self.species_defaults);
    }

    // ========================
    // Species Names
    // ========================

    pub fn load_species_names(&self) -> Vec<String> {
        self.read_json(&self.keys.species_names).unwrap_or_default()
    }

    /// Saved deduplicated, first occurrence wins, blanks dropped
    pub fn save_species_names(&mut self, names: &[String]) {
        self.species_names = unique_names(names.iter().map(String::as_str));
        if let Err(e) = self.write_json(&self.keys.species_names, &self.species_names) {
            log::error!("failed to save species names: {}", e);
        }
    }

    pub fn register_species_name(&mut self, name: &str) -> &[String] {
        let mut names = self.species_names.clone();
        names.push(name.to_string());
        self.save_species_names(&names);
        &self.species_names
    }

    // ========================
    // JSON helpers
    // ========================

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                log::error!("failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("corrupt data under {}: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PlantResult<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw).map_err(PlantError::from)
    }
}

/// Ordered, deduplicated, non-blank names
pub(crate) fn unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &T::Id) -> Option<T> {
    let pos = items.iter().position(|item| &item.id() == id)?;
    Some(items.remove(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LngLat;
    use crate::repository::MemoryKvStore;

    fn open(kv: &MemoryKvStore) -> RecordStore<&MemoryKvStore> {
        RecordStore::open(kv, StorageKeys::default())
    }

    fn point(id: &str, name: &str) -> PlantRecord {
        PlantRecord::point(PlantId::from(id), name, LngLat::new(118.9, 32.1))
    }

    #[test]
    fn test_empty_storage_loads_nothing() {
        let kv = MemoryKvStore::new();
        let store = open(&kv);
        assert!(store.load_plants().is_empty());
        assert!(store.load_species_defaults().is_empty());
        assert!(store.load_species_names().is_empty());
    }

    #[test]
    fn test_corrupt_storage_loads_nothing() {
        let kv = MemoryKvStore::new()
            .with_value("campus_plant_local", "[{broken")
            .with_value("campus_plant_species", "{}");
        let store = open(&kv);
        assert!(store.plants().is_empty());
        assert!(store.load_species_names().is_empty());
    }

    #[test]
    fn test_save_load_round_trip_is_idempotent() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[{"id": 17, "type": "point", "name": "Cherry", "position": [1, 2], "bloomStart": ""}]"#,
        );
        let store = open(&kv);
        let first = store.load_plants();
        store.save_plants(&first);
        let stored = kv.raw("campus_plant_local").unwrap();
        let second = store.load_plants();
        store.save_plants(&second);

        assert_eq!(first, second);
        assert_eq!(kv.raw("campus_plant_local").unwrap(), stored);
    }

    #[test]
    fn test_append_and_remove_exactly_one() {
        let kv = MemoryKvStore::new();
        let mut store = open(&kv);
        store.append_plant(point("a", "Cherry"));
        store.append_plant(point("b", "Maple"));
        store.append_plant(point("c", "Ginkgo"));

        let removed = store.remove_plant(&PlantId::from("b")).unwrap();
        assert_eq!(removed.name, "Maple");

        let ids: Vec<_> = store.load_plants().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlantId::from("a"), PlantId::from("c")]);
        assert!(store.remove_plant(&PlantId::from("missing")).is_none());
        assert_eq!(store.plants().len(), 2);
    }

    #[test]
    fn test_failed_write_keeps_session_copy() {
        let kv = MemoryKvStore::new();
        let mut store = open(&kv);
        kv.set_reject_writes(true);
        store.append_plant(point("a", "Cherry"));

        assert_eq!(store.plants().len(), 1);
        assert!(store.find_plant(&PlantId::from("a")).is_some());
        assert!(store.load_plants().is_empty());
    }

    #[test]
    fn test_species_names_deduplicated() {
        let kv = MemoryKvStore::new();
        let mut store = open(&kv);
        store.save_species_names(&[
            "Cherry".to_string(),
            "Maple".to_string(),
            "Cherry".to_string(),
            " ".to_string(),
        ]);
        assert_eq!(store.load_species_names(), vec!["Cherry", "Maple"]);

        let names = store.register_species_name("Ginkgo").to_vec();
        assert_eq!(names, vec!["Cherry", "Maple", "Ginkgo"]);
        assert_eq!(store.register_species_name("Maple").len(), 3);
        assert_eq!(store.load_species_names(), vec!["Cherry", "Maple", "Ginkgo"]);
    }

    #[test]
    fn test_species_defaults_keyed_by_name() {
        let kv = MemoryKvStore::new();
        let mut store = open(&kv);
        store.upsert_species_default(SpeciesDefault {
            name: "Cherry".to_string(),
            icon: Some("images/a.png".to_string()),
            ..Default::default()
        });
        store.upsert_species_default(SpeciesDefault {
            name: "Cherry".to_string(),
            icon: Some("images/b.png".to_string()),
            ..Default::default()
        });
        let defaults = store.load_species_defaults();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults["Cherry"].icon(), Some("images/b.png"));
    }

    #[test]
    fn test_off_schema_plant_does_not_hide_the_rest() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[
                {"id": "a", "type": "point", "name": "Maple", "position": [1, 2]},
                {"id": "b", "type": "point", "name": null, "position": [3, 4]},
                {"id": "c", "type": "area", "name": "Bamboo", "path": [[0, 0], [1, 0], [1, 1]]}
            ]"#,
        );
        let mut store = open(&kv);
        let ids: Vec<_> = store.plants().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![PlantId::from("a"), PlantId::from("c")]);

        store.append_plant(point("d", "Ginkgo"));
        let names: Vec<_> = store.load_plants().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Maple", "Bamboo", "Ginkgo"]);
    }

    #[test]
    fn test_failed_write_keeps_species_in_session_copy() {
        let kv = MemoryKvStore::new().with_value("campus_plant_species", r#"["Cherry"]"#);
        let mut store = open(&kv);
        kv.set_reject_writes(true);
        store.upsert_species_default(SpeciesDefault {
            name: "Lotus".to_string(),
            ..Default::default()
        });
        store.register_species_name("Lotus");

        assert!(store.species_defaults().contains_key("Lotus"));
        assert_eq!(store.species_names(), ["Cherry", "Lotus"]);
        assert!(store.load_species_defaults().is_empty());
        assert_eq!(store.load_species_names(), vec!["Cherry"]);
    }
}
