//! Data layer wiring shared across the app.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::badges::{BadgeStore, BadgeStoreError};
use crate::cache::ProductCache;
use crate::catalog::{CatalogClient, OffClient};
use crate::config::ClientConfig;
use crate::gateway::ApiGateway;
use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;
use crate::store::CachedCatalog;
use crate::votes::VoteEngine;

/// Error constructing the data layer.
#[derive(Debug, Error)]
pub enum DataLayerError {
    /// The local badge store could not be loaded.
    #[error("badge store error: {0}")]
    Badges(#[from] BadgeStoreError),
}

/// The assembled client data layer.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// cached product store, the vote engine, the badge store, and the session
/// store. All clones share one product cache and one notification channel.
#[derive(Clone)]
pub struct DataLayer {
    inner: Arc<DataLayerInner>,
}

struct DataLayerInner {
    config: ClientConfig,
    session: SessionStore,
    catalog: CachedCatalog,
    votes: VoteEngine<CatalogClient>,
    badges: BadgeStore,
}

impl DataLayer {
    /// Assemble the data layer from configuration.
    ///
    /// Returns the layer together with the notification receiver the UI
    /// layer should consume; dropping the receiver silently discards
    /// notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if local state (the badge store) cannot be loaded.
    pub async fn new(
        config: ClientConfig,
    ) -> Result<(Self, UnboundedReceiver<Notification>), DataLayerError> {
        let session = SessionStore::new(&config.data_dir);
        let gateway = ApiGateway::new(&config, session.clone());

        let client = CatalogClient::new(gateway.clone());
        let off = OffClient::new(gateway, config.off_url.clone());
        let cache = ProductCache::new();

        let (notifier, notifications) = Notifier::channel();
        let votes = VoteEngine::new(client.clone(), cache.clone(), notifier);
        let catalog = CachedCatalog::new(client, off, cache);
        let badges = BadgeStore::load(&config.data_dir).await?;

        Ok((
            Self {
                inner: Arc::new(DataLayerInner {
                    config,
                    session,
                    catalog,
                    votes,
                    badges,
                }),
            },
            notifications,
        ))
    }

    /// The configuration this layer was built from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session token store (login/logout flows write through this).
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The cached product store.
    #[must_use]
    pub fn catalog(&self) -> &CachedCatalog {
        &self.inner.catalog
    }

    /// The optimistic vote mutation engine.
    #[must_use]
    pub fn votes(&self) -> &VoteEngine<CatalogClient> {
        &self.inner.votes
    }

    /// The persisted badge set.
    #[must_use]
    pub fn badges(&self) -> &BadgeStore {
        &self.inner.badges
    }
}
