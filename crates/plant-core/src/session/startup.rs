//! Startup Catalog Loading
//!
//! The species catalog is fetched first and the bundled plants second. A
//! failed fetch is logged and treated as empty; it never blocks the other.

use async_trait::async_trait;

use crate::config::{AppConfig, CatalogPaths};
use crate::domain::{PlantId, PlantRecord, SpeciesCatalog, SpeciesDefault};
use crate::error::PlantResult;
use crate::repository::{unique_names, KvStore, RecordStore};

/// Remote (or bundled) catalog documents
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch_species(&self, path: &str) -> PlantResult<Vec<SpeciesDefault>>;

    async fn fetch_plants(&self, path: &str) -> PlantResult<Vec<PlantRecord>>;
}

/// Raw fetch outcome, `None` where the fetch failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedCatalogs {
    pub species: Option<Vec<SpeciesDefault>>,
    pub plants: Option<Vec<PlantRecord>>,
}

/// Everything the session needs once startup is done
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub species: SpeciesCatalog,
    pub bundled: Vec<PlantRecord>,
    pub names: Vec<String>,
}

/// Fetch species then plants, in that order
pub async fn fetch_catalogs<C: CatalogSource + ?Sized>(
    source: &C,
    paths: &CatalogPaths,
) -> FetchedCatalogs {
    let species = match source.fetch_species(&paths.species).await {
        Ok(species) => Some(species),
        Err(e) => {
            log::warn!("species catalog unavailable ({}): {}", paths.species, e);
            None
        }
    };
    let plants = match source.fetch_plants(&paths.plants).await {
        Ok(plants) => Some(plants),
        Err(e) => {
            log::warn!("plant catalog unavailable ({}): {}", paths.plants, e);
            None
        }
    };
    FetchedCatalogs { species, plants }
}

/// Fetch both catalogs and combine them with the persisted state
pub async fn load_catalogs<C, S>(
    source: &C,
    store: &mut RecordStore<S>,
    config: &AppConfig,
) -> CatalogSnapshot
where
    C: CatalogSource + ?Sized,
    S: KvStore,
{
    let fetched = fetch_catalogs(source, &config.catalog).await;
    assemble(fetched, store, config)
}

/// Merge fetched catalogs with the user's species defaults and names.
/// The store's session copies are used, so entries whose write failed
/// survive. Saves the combined name list back.
pub fn assemble<S: KvStore>(
    fetched: FetchedCatalogs,
    store: &mut RecordStore<S>,
    config: &AppConfig,
) -> CatalogSnapshot {
    let mut species = SpeciesCatalog::new();
    for entry in fetched.species.unwrap_or_default() {
        species.insert(entry);
    }
    species.merge(store.species_defaults().clone());

    let bundled: Vec<PlantRecord> = fetched
        .plants
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            if record.id.is_empty() {
                record.id = PlantId::from(format!("data_{}", index));
            }
            record
        })
        .collect();

    let names = species_names(store.species_names(), &species, &bundled, store.plants(), config);
    store.save_species_names(&names);

    log::info!(
        "catalogs loaded: {} species, {} bundled plants, {} local plants",
        species.len(),
        bundled.len(),
        store.plants().len()
    );
    CatalogSnapshot { species, bundled, names }
}

/// Ordered union of every known name, never empty
pub(crate) fn species_names(
    persisted: &[String],
    species: &SpeciesCatalog,
    bundled: &[PlantRecord],
    local: &[PlantRecord],
    config: &AppConfig,
) -> Vec<String> {
    let names = unique_names(
        persisted
            .iter()
            .map(String::as_str)
            .chain(species.names())
            .chain(bundled.iter().map(|p| p.name.as_str()))
            .chain(local.iter().map(|p| p.name.as_str())),
    );
    if names.is_empty() {
        vec![config.unnamed_species.clone()]
    } else {
        names
    }
}
