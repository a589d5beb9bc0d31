//! Integration tests for Shelfscan.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the data layer at a local backend
//! export SHELFSCAN_API_URL=http://localhost:3000
//!
//! # Run the ignored end-to-end tests
//! cargo test -p shelfscan-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `product_votes` - Vote round trips against a live product service
//! - `catalog_reads` - Lookup and search against both catalogs
//!
//! The tests build a real [`shelfscan_client::DataLayer`] over a throwaway
//! data directory, so no local state leaks between runs.
