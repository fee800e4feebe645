//! Rendered-page memoization
//!
//! The achievements page is expensive to compute (several aggregate
//! queries) and changes slowly, so the rendered HTML is memoized for a
//! short TTL and shared across concurrent callers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

/// Cache key of the achievements page.
pub const ACHIEVEMENTS_PAGE_KEY: &str = "achievements";

#[derive(Clone)]
pub struct PageCache {
    inner: Cache<String, Arc<String>>,
}

impl PageCache {
    pub fn new(ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!("PageCache initialized with TTL: {}s", ttl_secs);
        PageCache { inner }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<String>> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: &str, html: String) -> Arc<String> {
        let html = Arc::new(html);
        self.inner.insert(key.to_string(), html.clone()).await;
        html
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let cache = PageCache::new(60);
        assert!(cache.get(ACHIEVEMENTS_PAGE_KEY).await.is_none());

        cache
            .insert(ACHIEVEMENTS_PAGE_KEY, "<html></html>".to_string())
            .await;
        let hit = cache.get(ACHIEVEMENTS_PAGE_KEY).await.unwrap();
        assert_eq!(hit.as_str(), "<html></html>");
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let cache = PageCache::new(60);
        cache.insert(ACHIEVEMENTS_PAGE_KEY, "x".to_string()).await;
        cache.invalidate_all();
        // moka invalidation is eventually visible; run pending tasks first.
        cache.inner.run_pending_tasks().await;
        assert!(cache.get(ACHIEVEMENTS_PAGE_KEY).await.is_none());
    }
}
