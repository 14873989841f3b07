use metrics_exporter_prometheus::PrometheusHandle;
use rentify::accounts::UserDirectory;
use rentify::config::CatalogConfig;
use rentify::listings::{CatalogService, InMemoryPropertyStore};
use rentify::seed::{SeedData, SeedError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Catalog = CatalogService<InMemoryPropertyStore>;

/// Build the catalog once for the process lifetime; every consumer shares the returned handle.
pub(crate) fn build_catalog(config: &CatalogConfig) -> Result<Arc<Catalog>, SeedError> {
    let seed = SeedData::load(config.seed_path.as_deref())?;
    info!(
        listings = seed.properties.len(),
        users = seed.users.len(),
        source = config
            .seed_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_string()),
        "catalog seeded"
    );

    let store = Arc::new(InMemoryPropertyStore::new(seed.properties));
    let directory = UserDirectory::new(seed.users);
    Ok(Arc::new(CatalogService::new(store, directory)))
}
