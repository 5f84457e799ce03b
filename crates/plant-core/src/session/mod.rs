//! Annotation Session
//!
//! Owns every piece of mutable state: the record store, the species catalog,
//! the bundled plants, the live overlays and the interaction mode. The
//! browser shell forwards user input here and re-renders from the accessors.

mod interaction;
mod startup;

pub use interaction::{ControlState, Mode, ModeKind};
pub use startup::{
    assemble, fetch_catalogs, load_catalogs, CatalogSnapshot, CatalogSource, FetchedCatalogs,
};

use crate::config::AppConfig;
use crate::domain::{
    Geometry, PlantId, PlantRecord, SpeciesCatalog, SpeciesDefault, SpeciesDraft,
};
use crate::error::{PlantResult, ValidationError};
use crate::overlay::{MapSurface, OverlaySynchronizer};
use crate::repository::{KvStore, RecordStore};

/// Select-box value standing for "define a new species"
pub const ADD_SPECIES_SENTINEL: &str = "__add_new__";

pub struct AnnotationSession<S: KvStore, M: MapSurface> {
    config: AppConfig,
    surface: M,
    store: RecordStore<S>,
    species: SpeciesCatalog,
    /// Read-only plants from the bundled catalog
    bundled: Vec<PlantRecord>,
    species_names: Vec<String>,
    selected_species: Option<String>,
    overlays: OverlaySynchronizer<M::Handle>,
    mode: Mode<M::Handle>,
}

impl<S: KvStore, M: MapSurface> AnnotationSession<S, M> {
    /// Open the session with persisted state only; catalogs arrive later
    /// through `apply_catalogs`.
    pub fn new(config: AppConfig, kv: S, surface: M) -> Self {
        let store = RecordStore::open(kv, config.storage.clone());
        let mut species = SpeciesCatalog::new();
        species.merge(store.species_defaults().clone());
        let species_names = startup::species_names(
            store.species_names(),
            &species,
            &[],
            store.plants(),
            &config,
        );
        let overlays = OverlaySynchronizer::new(config.fallback_icon.clone(), config.default_anchor);

        let mut session = Self {
            config,
            surface,
            store,
            species,
            bundled: Vec::new(),
            species_names,
            selected_species: None,
            overlays,
            mode: Mode::Idle,
        };
        session.rebuild();
        session
    }

    /// Install the startup catalogs and redraw everything
    pub fn apply_catalogs(&mut self, snapshot: CatalogSnapshot) {
        self.species = snapshot.species;
        self.bundled = snapshot.bundled;
        self.species_names = snapshot.names;
        self.rebuild();
    }

    /// Combine raw fetch results with persisted state, then apply them
    pub fn apply_fetched(&mut self, fetched: FetchedCatalogs) {
        let snapshot = assemble(fetched, &mut self.store, &self.config);
        self.apply_catalogs(snapshot);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Locally created plants, oldest first
    pub fn local_plants(&self) -> &[PlantRecord] {
        self.store.plants()
    }

    pub fn species(&self) -> &SpeciesCatalog {
        &self.species
    }

    pub fn species_names(&self) -> &[String] {
        &self.species_names
    }

    pub fn selected_species(&self) -> Option<&str> {
        self.selected_species.as_deref()
    }

    pub fn overlays(&self) -> &OverlaySynchronizer<M::Handle> {
        &self.overlays
    }

    /// Look a record up among local plants first, then bundled ones
    pub fn find_plant(&self, id: &PlantId) -> Option<&PlantRecord> {
        self.store
            .find_plant(id)
            .or_else(|| self.bundled.iter().find(|p| &p.id == id))
    }

    pub fn is_local(&self, id: &PlantId) -> bool {
        self.store.find_plant(id).is_some()
    }

    /// Recreate all overlays from bundled and local plants
    pub fn rebuild(&mut self) {
        let records = self.bundled.iter().chain(self.store.plants());
        self.overlays.rebuild_all(&self.surface, records, &self.species);
    }

    /// Remove a local plant and its overlays. Bundled plants are read-only.
    pub fn delete_plant(&mut self, id: &PlantId) -> Option<PlantRecord> {
        let removed = self.store.remove_plant(id)?;
        log::info!("deleted plant {} ({})", removed.id, removed.name);
        self.rebuild();
        Some(removed)
    }

    /// Record the species chosen in the selector.
    /// Blank names and the add-new sentinel clear the selection.
    pub fn select_species(&mut self, name: &str) {
        let name = name.trim();
        self.selected_species = if name.is_empty() || name == ADD_SPECIES_SENTINEL {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Define a user species, persist it and select it
    pub fn add_species(&mut self, draft: SpeciesDraft) -> PlantResult<()> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySpeciesName.into());
        }
        let description = draft.description.trim();
        let species = SpeciesDefault {
            name: name.to_string(),
            icon: Some(self.config.fallback_icon.clone()),
            season: draft.season.or(&Default::default()),
            description: (!description.is_empty()).then(|| description.to_string()),
            ..Default::default()
        };

        self.species.insert(species.clone());
        self.store.upsert_species_default(species);
        self.store.register_species_name(name);
        if !self.species_names.iter().any(|n| n == name) {
            self.species_names.push(name.to_string());
        }
        log::info!("added species {}", name);
        self.select_species(name);
        Ok(())
    }

    /// Center the map on a record: points at their position, areas at
    /// their centroid, each with its own zoom level
    pub fn focus_plant(&self, id: &PlantId) -> Option<&PlantRecord> {
        let record = self.find_plant(id)?;
        let zoom = match record.geometry {
            Geometry::Point { .. } => self.config.map.point_focus_zoom,
            Geometry::Area { .. } => self.config.map.area_focus_zoom,
        };
        if let Some(center) = record.geometry.centroid() {
            self.surface.focus(center, zoom);
        }
        Some(record)
    }
}
