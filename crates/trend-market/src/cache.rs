//! Caching layer for fetched price history to reduce API calls

use crate::error::Result;
use crate::provider::{MarketDataProvider, MarketSeries};
use async_trait::async_trait;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Cache key for price history requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    /// Stock symbol
    pub symbol: String,
    /// Trailing span of the request, in days
    pub days: u32,
}

/// Thread-safe timed cache for fetched series
pub struct QuoteCache {
    cache: Arc<RwLock<TimedCache<QuoteKey, MarketSeries>>>,
}

impl QuoteCache {
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a cached series
    pub async fn get(&self, key: &QuoteKey) -> Option<MarketSeries> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a fetched series
    pub async fn insert(&self, key: QuoteKey, value: MarketSeries) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Provider wrapper that serves repeat requests from a timed cache
pub struct CachedMarketData<P> {
    inner: P,
    cache: QuoteCache,
}

impl<P: MarketDataProvider> CachedMarketData<P> {
    /// Wrap a provider with a cache of the given TTL
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: QuoteCache::new(ttl),
        }
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedMarketData<P> {
    async fn fetch_series(&self, symbol: &str, days: u32) -> Result<MarketSeries> {
        let key = QuoteKey {
            symbol: symbol.to_string(),
            days,
        };

        if let Some(hit) = self.cache.get(&key).await {
            debug!(symbol, days, "cache hit");
            return Ok(hit);
        }
        debug!(symbol, days, "cache miss");

        let fetched = self.inner.fetch_series(symbol, days).await?;
        self.cache.insert(key, fetched.clone()).await;
        Ok(fetched)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
