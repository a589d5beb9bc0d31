//! Shelfscan client data layer.
//!
//! This crate is everything between the UI and the network: it fetches and
//! caches product snapshots, applies optimistic vote updates with rollback,
//! and persists locally-earned badges.
//!
//! # Architecture
//!
//! - [`gateway`] - all outbound HTTP passes through one pre-send hook that
//!   attaches the bearer token from the session store
//! - [`catalog`] - typed clients for the internal product API and the
//!   external Open Food Facts catalog
//! - [`cache`] - the explicit product cache service (snapshot reads,
//!   staleness marking, pending-refresh cancellation)
//! - [`store`] - the cached read path with declared freshness policies
//! - [`votes`] - the four-phase optimistic vote mutation engine
//! - [`badges`] - the persisted badge set
//! - [`notify`] - the user-visible notification surface
//! - [`state`] - [`DataLayer`](state::DataLayer), which wires it all up
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfscan_client::config::ClientConfig;
//! use shelfscan_client::state::DataLayer;
//! use shelfscan_core::{Ean, Vote};
//!
//! let config = ClientConfig::from_env()?;
//! let (data, mut notifications) = DataLayer::new(config).await?;
//!
//! let ean: Ean = "4008400404127".parse()?;
//! let product = data.catalog().product(&ean).await?;
//! data.votes().set_vote(&ean, Vote::Up).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod badges;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod session;
pub mod state;
pub mod store;
pub mod votes;

pub use error::ApiError;
pub use state::DataLayer;
