//! Cached read path over the product backends.
//!
//! Freshness windows are declared here and handed to the cache layer;
//! nothing in this module implements eviction itself. Internal product
//! lookups go through the [`ProductCache`] so the mutation engine shares
//! the same entries; external lookups get their own keyed cache; searches
//! are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;
use tracing::{debug, instrument};

use shelfscan_core::{Ean, Product};

use crate::cache::ProductCache;
use crate::catalog::{CatalogClient, OffClient};
use crate::error::ApiError;

/// How long a fetched product snapshot counts as fresh.
pub const PRODUCT_FRESH_FOR: Duration = Duration::from_secs(5 * 60);

/// How long an external catalog record counts as fresh.
pub const EXTERNAL_PRODUCT_FRESH_FOR: Duration = Duration::from_secs(5 * 60);

/// Upper bound on cached external records.
const EXTERNAL_MAX_CAPACITY: u64 = 1000;

/// Read-through product store.
///
/// Serves fresh cache entries directly and otherwise refetches. The
/// network half of a refetch runs as a spawned task registered with the
/// cache service, so a mutation's predict phase can cancel it before it
/// lands on top of the prediction.
#[derive(Clone)]
pub struct CachedCatalog {
    inner: Arc<CachedCatalogInner>,
}

struct CachedCatalogInner {
    client: CatalogClient,
    off: OffClient,
    cache: ProductCache,
    external: Cache<Ean, Value>,
}

impl CachedCatalog {
    /// Create a new store over the given clients and shared cache.
    #[must_use]
    pub fn new(client: CatalogClient, off: OffClient, cache: ProductCache) -> Self {
        let external = Cache::builder()
            .max_capacity(EXTERNAL_MAX_CAPACITY)
            .time_to_live(EXTERNAL_PRODUCT_FRESH_FOR)
            .build();

        Self {
            inner: Arc::new(CachedCatalogInner {
                client,
                off,
                cache,
                external,
            }),
        }
    }

    /// The shared product cache this store reads and writes.
    #[must_use]
    pub fn cache(&self) -> &ProductCache {
        &self.inner.cache
    }

    /// Get a product snapshot, serving the cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the refetch fails, or `ApiError::Cancelled` if
    /// the refetch was cancelled and no cached value exists to fall back
    /// to.
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn product(&self, ean: &Ean) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.cache.get_fresh(ean, PRODUCT_FRESH_FOR).await {
            return Ok(product);
        }
        self.refresh_product(ean).await
    }

    /// Refetch one product, bypassing freshness.
    ///
    /// The fetch runs as an abortable task registered with the cache. When
    /// a mutation cancels it mid-flight, the cache's current value (the
    /// freshly written prediction) is served instead; the aborted fetch's
    /// result is discarded.
    async fn refresh_product(&self, ean: &Ean) -> Result<Product, ApiError> {
        let client = self.inner.client.clone();
        let key = ean.clone();
        let task = tokio::spawn(async move { client.fetch_product(&key).await });
        self.inner.cache.track_refresh(ean, task.abort_handle());

        let joined = task.await;
        self.inner.cache.clear_refresh(ean);

        match joined {
            Ok(Ok(product)) => {
                self.inner.cache.set(ean.clone(), product.clone()).await;
                Ok(product)
            }
            Ok(Err(err)) => Err(err),
            Err(join_err) if join_err.is_cancelled() => {
                debug!(%ean, "refresh cancelled, serving cached snapshot");
                self.inner.cache.get(ean).await.ok_or(ApiError::Cancelled)
            }
            Err(join_err) => Err(ApiError::Task(join_err.to_string())),
        }
    }

    /// Get snapshots for several barcodes (fail-fast batch).
    ///
    /// Batch results are keyed as a set and do not populate the per-product
    /// entries; a follow-up single lookup does its own fetch.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no partial results.
    pub async fn products(&self, eans: &[Ean]) -> Result<Vec<Product>, ApiError> {
        self.inner.client.fetch_products(eans).await
    }

    /// Get the external catalog record for a barcode, cached for
    /// [`EXTERNAL_PRODUCT_FRESH_FOR`].
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn external_product(&self, ean: &Ean) -> Result<Value, ApiError> {
        if let Some(record) = self.inner.external.get(ean).await {
            debug!(%ean, "external cache hit");
            return Ok(record);
        }

        let record = self.inner.off.fetch_product(ean).await?;
        self.inner.external.insert(ean.clone(), record.clone()).await;
        Ok(record)
    }

    /// Get external catalog records for several barcodes (fail-fast batch).
    ///
    /// # Errors
    ///
    /// Returns the first failure; no partial results.
    pub async fn external_products(&self, eans: &[Ean]) -> Result<Vec<Value>, ApiError> {
        self.inner.off.fetch_products(eans).await
    }

    /// Search the internal catalog. Always refetches; results are not
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn search(&self, query: &str) -> Result<Value, ApiError> {
        self.inner.client.search(query).await
    }

    /// Search the external catalog. Always refetches; results are not
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn external_search(&self, terms: &str) -> Result<Value, ApiError> {
        self.inner.off.search(terms).await
    }
}
