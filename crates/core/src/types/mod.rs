//! Core types for Shelfscan.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod ean;
pub mod product;
pub mod vote;

pub use ean::{Ean, EanError};
pub use product::{CatalogRecord, Product};
pub use vote::Vote;
