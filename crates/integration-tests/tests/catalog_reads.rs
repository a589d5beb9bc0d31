//! Integration tests for catalog lookups and search.
//!
//! These tests require a running product service (`SHELFSCAN_API_URL`);
//! the external tests additionally hit the public Open Food Facts API.
//!
//! Run with: cargo test -p shelfscan-integration-tests -- --ignored

use tempfile::TempDir;
use url::Url;

use shelfscan_client::config::ClientConfig;
use shelfscan_client::state::DataLayer;
use shelfscan_core::Ean;

/// A barcode with a well-known Open Food Facts record (Nutella 400g).
const KNOWN_OFF_EAN: &str = "3017620422003";

async fn data_layer() -> (DataLayer, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp data dir");

    let mut config = ClientConfig::with_data_dir(dir.path().to_path_buf());
    if let Ok(api_url) = std::env::var("SHELFSCAN_API_URL") {
        config.api_url = Url::parse(&api_url).expect("Invalid SHELFSCAN_API_URL");
    }

    let (data, _notifications) = DataLayer::new(config)
        .await
        .expect("Failed to build data layer");
    (data, dir)
}

// ============================================================================
// Internal Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running product service"]
async fn test_lookup_carries_requested_ean() {
    let (data, _dir) = data_layer().await;
    let ean: Ean = "4008400404127".parse().expect("Invalid EAN");

    let product = data
        .catalog()
        .product(&ean)
        .await
        .expect("Failed to fetch product");
    assert_eq!(product.ean, ean);
}

#[tokio::test]
#[ignore = "Requires a running product service"]
async fn test_second_lookup_is_served_from_cache() {
    let (data, _dir) = data_layer().await;
    let ean: Ean = "4008400404127".parse().expect("Invalid EAN");

    let first = data
        .catalog()
        .product(&ean)
        .await
        .expect("Failed to fetch product");
    let second = data
        .catalog()
        .product(&ean)
        .await
        .expect("Failed to refetch product");

    // Within the freshness window both reads see the same snapshot.
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore = "Requires a running product service"]
async fn test_batch_lookup_preserves_order() {
    let (data, _dir) = data_layer().await;
    let eans: Vec<Ean> = ["4008400404127", "96385074"]
        .iter()
        .map(|s| s.parse().expect("Invalid EAN"))
        .collect();

    let products = data
        .catalog()
        .products(&eans)
        .await
        .expect("Failed to fetch batch");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].ean, eans[0]);
    assert_eq!(products[1].ean, eans[1]);
}

// ============================================================================
// External Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Hits the public Open Food Facts API"]
async fn test_external_lookup_returns_record() {
    let (data, _dir) = data_layer().await;
    let ean: Ean = KNOWN_OFF_EAN.parse().expect("Invalid EAN");

    let record = data
        .catalog()
        .external_product(&ean)
        .await
        .expect("Failed to fetch external record");

    assert_eq!(record["code"], KNOWN_OFF_EAN);
}

#[tokio::test]
#[ignore = "Hits the public Open Food Facts API"]
async fn test_external_search_returns_products() {
    let (data, _dir) = data_layer().await;

    let results = data
        .catalog()
        .external_search("nutella")
        .await
        .expect("Failed to search external catalog");

    assert!(results["products"].is_array());
}
