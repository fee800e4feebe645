use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::PageCache;
use crate::config::get_config;
use crate::services::AchievementsService;
use crate::storage::SeaOrmStorage;

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub achievements_service: Arc<AchievementsService>,
    pub page_cache: PageCache,
}

/// Prepare the server startup context: storage, board service, page cache.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = Arc::new(
        SeaOrmStorage::new(&config.database)
            .await
            .context("Failed to create storage backend")?,
    );
    info!("Using storage backend: {}", storage.get_backend_name());

    let achievements_service = Arc::new(AchievementsService::new(storage.clone()));
    let page_cache = PageCache::new(config.cache.page_ttl);

    debug!(
        "Pre-startup processing finished in {:?}",
        start_time.elapsed()
    );

    Ok(StartupContext {
        storage,
        achievements_service,
        page_cache,
    })
}
