//! In-memory cache of fetched layers.
//!
//! Entries are keyed by layer id only and hold the unfiltered record set;
//! filters are applied after lookup. Entries never expire. Callers that need
//! fresh data use [`CachedLayerSource::refresh`], [`LayerCache::invalidate`]
//! or [`LayerCache::clear`].
//!
//! Concurrent first requests for the same uncached layer may each fetch it.
//! The results are identical, so the last insert simply wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use ogc_common::{LayerId, OgcResult};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::record::RecordSet;
use crate::source::LayerSource;

/// Layer id → full record set.
///
/// Shared between sources as `Arc<LayerCache>`; each test can create its own.
#[derive(Default)]
pub struct LayerCache {
    entries: RwLock<HashMap<LayerId, RecordSet>>,
    stats: LayerCacheStats,
}

/// Lookup statistics for a [`LayerCache`].
#[derive(Debug, Default)]
pub struct LayerCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub inserts: AtomicU64,
}

impl LayerCacheStats {
    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that found no entry.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Entries stored, including replacements.
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Cache hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

impl LayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, layer: &LayerId) -> Option<RecordSet> {
        let entries = self.entries.read().await;
        match entries.get(layer) {
            Some(records) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                counter!("layer_cache_hits_total").increment(1);
                Some(records.clone())
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                counter!("layer_cache_misses_total").increment(1);
                None
            }
        }
    }

    /// Store `records` for `layer`, replacing any previous entry.
    pub async fn insert(&self, layer: LayerId, records: RecordSet) {
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
        self.entries.write().await.insert(layer, records);
    }

    /// Drop one layer. Returns whether it was cached.
    pub async fn invalidate(&self, layer: &LayerId) -> bool {
        self.entries.write().await.remove(layer).is_some()
    }

    /// Drop every cached layer.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Whether `layer` is cached.
    pub async fn contains(&self, layer: &LayerId) -> bool {
        self.entries.read().await.contains_key(layer)
    }

    /// Number of cached layers.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no layer is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Hit, miss and insert counters.
    pub fn stats(&self) -> &LayerCacheStats {
        &self.stats
    }
}

/// A [`LayerSource`] that consults a [`LayerCache`] before its inner source.
pub struct CachedLayerSource<S> {
    inner: S,
    cache: Arc<LayerCache>,
}

impl<S: LayerSource> CachedLayerSource<S> {
    pub fn new(inner: S, cache: Arc<LayerCache>) -> Self {
        Self { inner, cache }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The cache consulted before the inner source.
    pub fn cache(&self) -> &Arc<LayerCache> {
        &self.cache
    }

    /// Fetch `layer` from the inner source regardless of the cache and
    /// replace the cached entry.
    #[instrument(skip(self), fields(layer = %layer))]
    pub async fn refresh(&self, layer: &LayerId) -> OgcResult<RecordSet> {
        let records = self.inner.fetch_layer(layer).await?;
        self.cache.insert(layer.clone(), records.clone()).await;
        debug!(features = records.len(), "Refreshed cached layer");
        Ok(records)
    }
}

#[async_trait]
impl<S: LayerSource> LayerSource for CachedLayerSource<S> {
    async fn fetch_layer(&self, layer: &LayerId) -> OgcResult<RecordSet> {
        if let Some(records) = self.cache.get(layer).await {
            debug!(layer = %layer, "Layer cache hit");
            return Ok(records);
        }

        debug!(layer = %layer, "Layer cache miss");
        let records = self.inner.fetch_layer(layer).await?;
        self.cache.insert(layer.clone(), records.clone()).await;
        Ok(records)
    }
}
