//! Open Food Facts catalog client.
//!
//! The external catalog owns its response schema, so everything here is
//! returned as raw JSON. Requests still go through the shared gateway and
//! therefore carry the same bearer token as internal calls.

use serde_json::Value;
use tracing::instrument;
use url::Url;

use shelfscan_core::Ean;

use crate::error::{ApiError, ensure_success};
use crate::gateway::ApiGateway;

/// Client for the public Open Food Facts API.
#[derive(Clone)]
pub struct OffClient {
    gateway: ApiGateway,
    base_url: Url,
}

impl OffClient {
    /// Create a new client for the given catalog base URL.
    #[must_use]
    pub const fn new(gateway: ApiGateway, base_url: Url) -> Self {
        Self { gateway, base_url }
    }

    /// Fetch the raw catalog record for a barcode.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn fetch_product(&self, ean: &Ean) -> Result<Value, ApiError> {
        let url = self.base_url.join(&format!("/api/v2/product/{ean}"))?;
        let response = self.gateway.get(url.as_str()).await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch raw catalog records for several barcodes, one request per key.
    ///
    /// Same fail-fast contract as the internal batch: all complete or the
    /// first failure fails the batch with no partial results.
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered.
    #[instrument(skip(self), fields(count = eans.len()))]
    pub async fn fetch_products(&self, eans: &[Ean]) -> Result<Vec<Value>, ApiError> {
        let fetches = eans
            .iter()
            .cloned()
            .map(|ean| {
                let client = self.clone();
                async move { client.fetch_product(&ean).await }
            })
            .collect();
        super::join_all_fail_fast(fetches).await
    }

    /// Full-text search in the external catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self))]
    pub async fn search(&self, terms: &str) -> Result<Value, ApiError> {
        let url = self.base_url.join("/cgi/search.pl")?;
        let response = self
            .gateway
            .get_query(
                url.as_str(),
                &[
                    ("search_terms", terms),
                    ("search_simple", "1"),
                    ("action", "process"),
                    ("json", "1"),
                ],
            )
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
