//! Optimistic vote mutations.
//!
//! Each mutation is one pass through a four-phase state machine:
//!
//! 1. **predict** - cancel any in-flight refresh for the key, read the
//!    cached snapshot, write a locally-computed prediction over it, and
//!    keep the old snapshot as rollback context;
//! 2. **send** - issue the network call (the prediction write always
//!    happens before the send);
//! 3. **reconcile** - on failure, restore the rollback snapshot and emit a
//!    user-visible error notification;
//! 4. **resynchronize** - success or failure, mark the key stale so the
//!    next read fetches the server's authoritative counts.
//!
//! The prediction is additive and does not model server-side vote
//! weighting or dedup; resynchronization is what corrects that drift, not
//! a retry.

use tracing::instrument;

use shelfscan_core::{Ean, Product, Vote};

use crate::cache::ProductCache;
use crate::catalog::CatalogClient;
use crate::error::ApiError;
use crate::notify::{Notification, Notifier};

/// Network side of a vote mutation.
///
/// The engine only needs the two vote endpoints; the seam keeps it
/// testable against a fake transport.
pub trait VoteTransport {
    /// Record a vote for the current user.
    fn create_vote(
        &self,
        ean: &Ean,
        vote: Vote,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Remove the current user's vote.
    fn delete_vote(&self, ean: &Ean) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl VoteTransport for CatalogClient {
    async fn create_vote(&self, ean: &Ean, vote: Vote) -> Result<(), ApiError> {
        Self::create_vote(self, ean, vote).await
    }

    async fn delete_vote(&self, ean: &Ean) -> Result<(), ApiError> {
        Self::delete_vote(self, ean).await
    }
}

// =============================================================================
// Prediction arithmetic
// =============================================================================

/// Predicted snapshot after `SetVote(vote)` over `prev`.
///
/// Counter rules: the chosen direction gains one; the opposite direction
/// loses one only when it was the user's previous vote (a flip undoes the
/// old vote). Saturating arithmetic keeps the aggregate counters from ever
/// going negative, whatever state the server handed us.
#[must_use]
pub fn predict_set_vote(prev: &Product, vote: Vote) -> Product {
    let mut next = prev.clone();
    match vote {
        Vote::Up => {
            next.up_votes += 1;
            if prev.vote == Some(Vote::Down) {
                next.down_votes = next.down_votes.saturating_sub(1);
            }
        }
        Vote::Down => {
            next.down_votes += 1;
            if prev.vote == Some(Vote::Up) {
                next.up_votes = next.up_votes.saturating_sub(1);
            }
        }
    }
    next.vote = Some(vote);
    next
}

/// Predicted snapshot after `DeleteVote` over `prev`.
///
/// Only the counter matching the previous vote (if any) loses one.
#[must_use]
pub fn predict_clear_vote(prev: &Product) -> Product {
    let mut next = prev.clone();
    match prev.vote {
        Some(Vote::Up) => next.up_votes = next.up_votes.saturating_sub(1),
        Some(Vote::Down) => next.down_votes = next.down_votes.saturating_sub(1),
        None => {}
    }
    next.vote = None;
    next
}

// =============================================================================
// VoteEngine
// =============================================================================

/// Drives vote mutations against the shared product cache.
#[derive(Clone)]
pub struct VoteEngine<T> {
    transport: T,
    cache: ProductCache,
    notifier: Notifier,
}

impl<T: VoteTransport> VoteEngine<T> {
    /// Create an engine over the given transport, cache, and notifier.
    #[must_use]
    pub const fn new(transport: T, cache: ProductCache, notifier: Notifier) -> Self {
        Self {
            transport,
            cache,
            notifier,
        }
    }

    /// Cast or change the current user's vote on a product.
    ///
    /// # Errors
    ///
    /// Returns the transport error after rollback and notification; the
    /// cache is marked stale either way.
    #[instrument(skip(self), fields(ean = %ean, vote = %vote))]
    pub async fn set_vote(&self, ean: &Ean, vote: Vote) -> Result<(), ApiError> {
        let rollback = self
            .predict(ean, |prev| predict_set_vote(prev, vote))
            .await;
        let outcome = self.transport.create_vote(ean, vote).await;
        self.settle(ean, rollback, outcome).await
    }

    /// Remove the current user's vote from a product.
    ///
    /// # Errors
    ///
    /// Same contract as [`set_vote`](Self::set_vote).
    #[instrument(skip(self), fields(ean = %ean))]
    pub async fn clear_vote(&self, ean: &Ean) -> Result<(), ApiError> {
        let rollback = self.predict(ean, predict_clear_vote).await;
        let outcome = self.transport.delete_vote(ean).await;
        self.settle(ean, rollback, outcome).await
    }

    /// Predict phase: cancel the in-flight refresh, apply `compute` over
    /// the cached snapshot, and return the pre-prediction snapshot.
    ///
    /// With no cached entry there is nothing to update optimistically; the
    /// mutation still sends and still resynchronizes.
    async fn predict<F>(&self, ean: &Ean, compute: F) -> Option<Product>
    where
        F: FnOnce(&Product) -> Product,
    {
        self.cache.cancel_refresh(ean);
        let prev = self.cache.get(ean).await?;
        self.cache.set(ean.clone(), compute(&prev)).await;
        Some(prev)
    }

    /// Reconcile and resynchronize after the network call settles.
    async fn settle(
        &self,
        ean: &Ean,
        rollback: Option<Product>,
        outcome: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        if let Err(err) = &outcome {
            // Rollback restores the entire pre-prediction snapshot, so any
            // unrelated cache write to this key between predict and failure
            // is lost with it (last-rollback-wins). Inherited behavior.
            if let Some(prev) = rollback {
                self.cache.set(ean.clone(), prev).await;
            }
            self.notifier.notify(Notification::error(err.to_string()));
        }

        // The authoritative counts may disagree with the additive
        // prediction (weighting, dedup); a stale mark forces the next read
        // to find out.
        self.cache.invalidate(ean).await;
        outcome
    }
}
