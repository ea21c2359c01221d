pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use anyhow::Result;

use crate::app::sessions::SessionStore;
use crate::config::AppConfig;
use crate::infra::catalog::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub sessions: SessionStore,
    pub feed_page_size: usize,
    pub trending_limit: usize,
}

impl AppState {
    pub fn new(config: &AppConfig, catalog: Catalog) -> Self {
        Self {
            catalog,
            sessions: SessionStore::new(config.feed_page_size),
            feed_page_size: config.feed_page_size,
            trending_limit: config.trending_limit,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = Catalog::load(config.catalog_path.as_deref())?;
        Ok(Self::new(config, catalog))
    }
}
