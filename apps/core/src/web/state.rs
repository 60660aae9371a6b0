use std::sync::Arc;

use sqlx::SqlitePool;

use crate::brain::BrainAnalyzer;
use crate::cache::TenantCache;
use crate::generator::GeneratorClient;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub cache: Arc<TenantCache>,
    pub analyzer: BrainAnalyzer,
    pub generator: GeneratorClient,
}

impl AppState {
    pub fn new(pool: SqlitePool, generator: GeneratorClient) -> Self {
        Self {
            pool,
            cache: Arc::new(TenantCache::new()),
            analyzer: BrainAnalyzer::new(),
            generator,
        }
    }
}
