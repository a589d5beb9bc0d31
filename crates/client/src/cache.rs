//! Product cache service.
//!
//! One snapshot per [`Ean`], with explicit key-level operations: snapshot
//! reads (regardless of freshness), freshness-gated reads, prediction and
//! rollback writes, staleness marking, and cancellation of in-flight
//! refreshes. Storage sits on a bounded `moka` cache whose capacity/TTL
//! policy handles eviction; staleness marking keeps the value available to
//! readers until the next refetch replaces it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use moka::future::Cache;
use tokio::task::AbortHandle;
use tracing::debug;

use shelfscan_core::{Ean, Product};

/// Upper bound on cached products.
const MAX_CAPACITY: u64 = 1000;

/// Entry lifetime before the backbone evicts it outright.
const TIME_TO_LIVE: Duration = Duration::from_secs(30 * 60);

/// A cached product snapshot with freshness metadata.
#[derive(Debug, Clone)]
struct CacheEntry {
    product: Product,
    written_at: Instant,
    stale: bool,
}

impl CacheEntry {
    fn fresh(product: Product) -> Self {
        Self {
            product,
            written_at: Instant::now(),
            stale: false,
        }
    }

    fn is_fresh(&self, fresh_for: Duration) -> bool {
        !self.stale && self.written_at.elapsed() < fresh_for
    }
}

/// Shared, process-wide product cache.
///
/// Cheaply cloneable; all clones see the same entries. Writes to a key go
/// through the backbone's own per-key ordering; nothing here is a lock, and
/// `cancel_refresh` before a prediction write is a best-effort race
/// mitigation only.
#[derive(Clone)]
pub struct ProductCache {
    inner: Arc<ProductCacheInner>,
}

struct ProductCacheInner {
    entries: Cache<Ean, CacheEntry>,
    refreshes: Mutex<HashMap<Ean, AbortHandle>>,
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_CAPACITY)
            .time_to_live(TIME_TO_LIVE)
            .build();

        Self {
            inner: Arc::new(ProductCacheInner {
                entries,
                refreshes: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Snapshot read: the last known product for this key, stale or not.
    ///
    /// This is what the mutation engine's predict phase reads; a stale
    /// value is still the right base for an optimistic update.
    pub async fn get(&self, ean: &Ean) -> Option<Product> {
        self.inner.entries.get(ean).await.map(|e| e.product)
    }

    /// Freshness-gated read for the fetch path.
    ///
    /// Returns the product only if the entry is unmarked and younger than
    /// `fresh_for`.
    pub async fn get_fresh(&self, ean: &Ean, fresh_for: Duration) -> Option<Product> {
        let entry = self.inner.entries.get(ean).await?;
        if entry.is_fresh(fresh_for) {
            debug!(%ean, "cache hit");
            Some(entry.product)
        } else {
            None
        }
    }

    /// Overwrite the snapshot for this key.
    ///
    /// Used by the fetch path on success and by the mutation engine for
    /// both prediction and rollback writes. The new entry counts as fresh.
    pub async fn set(&self, ean: Ean, product: Product) {
        self.inner
            .entries
            .insert(ean, CacheEntry::fresh(product))
            .await;
    }

    /// Mark this key stale, retaining the value.
    ///
    /// The next freshness-gated read misses and triggers a refetch; plain
    /// snapshot reads still see the last value until then. Absent keys are
    /// a no-op.
    pub async fn invalidate(&self, ean: &Ean) {
        if let Some(mut entry) = self.inner.entries.get(ean).await {
            entry.stale = true;
            self.inner.entries.insert(ean.clone(), entry).await;
        }
    }

    /// Register an in-flight refresh for this key.
    ///
    /// A later `track_refresh` for the same key replaces the handle; the
    /// superseded task is left to finish and its result to be discarded.
    pub fn track_refresh(&self, ean: &Ean, handle: AbortHandle) {
        if let Ok(mut refreshes) = self.inner.refreshes.lock() {
            refreshes.insert(ean.clone(), handle);
        }
    }

    /// Cancel any in-flight refresh for this key.
    ///
    /// Called by the mutation engine before a prediction write so a stale
    /// refetch cannot land on top of the prediction. Cooperative: a task
    /// already past its await point may still complete.
    pub fn cancel_refresh(&self, ean: &Ean) {
        let handle = match self.inner.refreshes.lock() {
            Ok(mut refreshes) => refreshes.remove(ean),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            debug!(%ean, "cancelling in-flight refresh");
            handle.abort();
        }
    }

    /// Drop the refresh registration for this key after the task settled.
    pub fn clear_refresh(&self, ean: &Ean) {
        if let Ok(mut refreshes) = self.inner.refreshes.lock() {
            refreshes.remove(ean);
        }
    }
}
