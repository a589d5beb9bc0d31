//! Product backend clients.
//!
//! Two backends serve product data: the internal Shelfscan service (typed
//! snapshots plus the vote endpoints) and the public Open Food Facts
//! catalog (raw JSON, schema owned by the third party). Both send through
//! the shared [`ApiGateway`](crate::gateway::ApiGateway) so the bearer
//! token is attached uniformly.

mod off;

pub use off::OffClient;

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::instrument;

use shelfscan_core::{CatalogRecord, Ean, Product, Vote};

use crate::error::{ApiError, ensure_success};
use crate::gateway::ApiGateway;

/// Client for the internal product service.
///
/// All read operations are idempotent and side-effect-free on the server;
/// the vote operations are the only writes.
#[derive(Clone)]
pub struct CatalogClient {
    gateway: ApiGateway,
}

impl CatalogClient {
    /// Create a new client over the shared gateway.
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetch one product snapshot by barcode.
    ///
    /// The response nests the catalog record under `body.product`;
    /// normalization hoists it, defaults missing counters to zero, and
    /// stamps the requested `ean` onto the result even if the server
    /// omitted it. A missing catalog record is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn fetch_product(&self, ean: &Ean) -> Result<Product, ApiError> {
        let response = self.gateway.get(&format!("/product/{ean}")).await?;
        let response = ensure_success(response).await?;

        // Read the body as text first for better error diagnostics.
        let response_text = response.text().await?;
        let envelope: ProductEnvelope = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse product response"
                );
                return Err(ApiError::Parse(e));
            }
        };

        Ok(envelope.normalize(ean.clone()))
    }

    /// Fetch snapshots for several barcodes, one request per key.
    ///
    /// Requests run concurrently; the batch resolves only once all of them
    /// complete and fails as a whole on the first failure - no partial
    /// results. Remaining in-flight requests are dropped with the set.
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered.
    #[instrument(skip(self), fields(count = eans.len()))]
    pub async fn fetch_products(&self, eans: &[Ean]) -> Result<Vec<Product>, ApiError> {
        let fetches = eans
            .iter()
            .cloned()
            .map(|ean| {
                let client = self.clone();
                async move { client.fetch_product(&ean).await }
            })
            .collect();
        join_all_fail_fast(fetches).await
    }

    /// Search the internal catalog.
    ///
    /// The result schema is owned by the backend; the body is returned raw.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Value, ApiError> {
        let response = self.gateway.get(&format!("/product/search/{query}")).await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Record a vote for the current user.
    ///
    /// The acknowledgement body is opaque and discarded.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    #[instrument(skip(self), fields(ean = %ean, vote = %vote))]
    pub async fn create_vote(&self, ean: &Ean, vote: Vote) -> Result<(), ApiError> {
        let response = self
            .gateway
            .post_json(
                &format!("/product/vote/{ean}"),
                &serde_json::json!({ "vote": vote.as_bool() }),
            )
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Remove the current user's vote.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn delete_vote(&self, ean: &Ean) -> Result<(), ApiError> {
        let response = self.gateway.delete(&format!("/product/vote/{ean}")).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

// =============================================================================
// Batch fan-out
// =============================================================================

/// Run a batch of fetches concurrently, resolving only when all complete.
///
/// The first failure fails the whole batch: no partial results are
/// returned, and dropping the task set aborts whatever is still in flight.
/// Results come back in input order.
pub(crate) async fn join_all_fail_fast<T, F>(fetches: Vec<F>) -> Result<Vec<T>, ApiError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let count = fetches.len();
    let mut set = JoinSet::new();
    for (index, fetch) in fetches.into_iter().enumerate() {
        set.spawn(async move { (index, fetch.await) });
    }

    let mut results: Vec<Option<T>> = Vec::with_capacity(count);
    results.resize_with(count, || None);

    while let Some(joined) = set.join_next().await {
        let (index, result) = joined.map_err(|e| ApiError::Task(e.to_string()))?;
        if let Some(slot) = results.get_mut(index) {
            *slot = Some(result?);
        }
    }

    Ok(results.into_iter().flatten().collect())
}

// =============================================================================
// Response normalization
// =============================================================================

/// Wire shape of `GET /product/{ean}`.
///
/// Every field is optional on the wire; normalization fills the gaps rather
/// than failing.
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    body: Option<ProductBody>,
    #[serde(default, rename = "upVotes")]
    up_votes: u64,
    #[serde(default, rename = "downVotes")]
    down_votes: u64,
    #[serde(default)]
    vote: Option<Vote>,
}

#[derive(Debug, Deserialize)]
struct ProductBody {
    #[serde(default)]
    product: Option<CatalogRecord>,
}

impl ProductEnvelope {
    /// Hoist `body.product` and stamp the requested barcode.
    fn normalize(self, ean: Ean) -> Product {
        Product {
            ean,
            product: self.body.and_then(|b| b.product),
            up_votes: self.up_votes,
            down_votes: self.down_votes,
            vote: self.vote,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ean() -> Ean {
        Ean::parse("4008400404127").unwrap()
    }

    #[test]
    fn test_normalize_hoists_nested_record() {
        let envelope: ProductEnvelope = serde_json::from_str(
            r#"{
                "body": { "product": { "name": "Oat Drink" } },
                "upVotes": 3,
                "downVotes": 1,
                "vote": false
            }"#,
        )
        .unwrap();

        let product = envelope.normalize(ean());
        assert_eq!(product.ean, ean());
        assert_eq!(product.product.unwrap().get("name"), Some("Oat Drink"));
        assert_eq!(product.up_votes, 3);
        assert_eq!(product.down_votes, 1);
        assert_eq!(product.vote, Some(Vote::Down));
    }

    #[test]
    fn test_normalize_missing_body_is_unknown_product() {
        let envelope: ProductEnvelope = serde_json::from_str("{}").unwrap();
        let product = envelope.normalize(ean());

        assert_eq!(product.ean, ean());
        assert!(product.product.is_none());
        assert_eq!(product.up_votes, 0);
        assert_eq!(product.vote, None);
    }

    #[test]
    fn test_normalize_body_without_record() {
        let envelope: ProductEnvelope =
            serde_json::from_str(r#"{ "body": {}, "upVotes": 7 }"#).unwrap();
        let product = envelope.normalize(ean());

        assert!(product.product.is_none());
        assert_eq!(product.up_votes, 7);
    }

    #[test]
    fn test_normalize_stamps_requested_ean() {
        // The server response carries no ean at all; the requested key wins.
        let envelope: ProductEnvelope =
            serde_json::from_str(r#"{ "upVotes": 1, "downVotes": 0, "vote": true }"#).unwrap();
        let product = envelope.normalize(ean());
        assert_eq!(product.ean.as_str(), "4008400404127");
    }

    #[tokio::test]
    async fn test_batch_resolves_in_input_order() {
        let fetches = vec![
            fetch_after(30, "a"),
            fetch_after(10, "b"),
            fetch_after(20, "c"),
        ];
        let results = join_all_fail_fast(fetches).await.unwrap();
        assert_eq!(results, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_batch_fails_fast_with_no_partial_results() {
        // The middle key fails; the batch as a whole fails even though the
        // other two fetches would have succeeded.
        let fetches = vec![
            fetch_after(10, "a"),
            failing_fetch(20),
            fetch_after(30, "c"),
        ];
        let err = join_all_fail_fast(fetches).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let fetches: Vec<std::future::Ready<Result<&str, ApiError>>> = Vec::new();
        let results = join_all_fail_fast(fetches).await.unwrap();
        assert!(results.is_empty());
    }

    fn fetch_after(
        millis: u64,
        value: &'static str,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<&'static str, ApiError>> + Send>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
            Ok(value)
        })
    }

    fn failing_fetch(
        millis: u64,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<&'static str, ApiError>> + Send>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
            Err(ApiError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        })
    }
}
