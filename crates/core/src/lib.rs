//! Shelfscan Core - Shared types library.
//!
//! This crate provides common types used across all Shelfscan components:
//! - `client` - The app-facing data layer (product store, votes, badges)
//! - `cli` - Command-line front end for manual lookups and voting
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Ean` barcode key, `Product` snapshots, and the
//!   tri-state `Vote`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
