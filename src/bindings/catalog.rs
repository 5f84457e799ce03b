//! HTTP Catalog Source
//!
//! Static JSON and Markdown files served next to the page.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use plant_core::domain::{PlantRecord, SpeciesDefault};
use plant_core::session::CatalogSource;
use plant_core::{AppConfig, PlantError, PlantResult};

/// Where an optional config override lives
const CONFIG_PATH: &str = "data/config.json";

pub struct HttpCatalog;

#[async_trait(?Send)]
impl CatalogSource for HttpCatalog {
    async fn fetch_species(&self, path: &str) -> PlantResult<Vec<SpeciesDefault>> {
        fetch_json(path).await
    }

    async fn fetch_plants(&self, path: &str) -> PlantResult<Vec<PlantRecord>> {
        fetch_json(path).await
    }
}

async fn fetch_text(url: &str) -> PlantResult<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| PlantError::Catalog(e.to_string()))?;
    if !resp.ok() {
        return Err(PlantError::Catalog(format!("HTTP {} for {}", resp.status(), url)));
    }
    resp.text().await.map_err(|e| PlantError::Catalog(e.to_string()))
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> PlantResult<T> {
    let text = fetch_text(url).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Deployment config, or the built-in defaults when there is none
pub async fn fetch_config() -> AppConfig {
    match fetch_text(CONFIG_PATH).await {
        Ok(raw) => AppConfig::from_json_or_default(&raw),
        Err(e) => {
            log::info!("using default config: {}", e);
            AppConfig::default()
        }
    }
}

/// Raw Markdown of a species document
pub async fn fetch_doc(path: &str) -> PlantResult<String> {
    fetch_text(path).await
}
