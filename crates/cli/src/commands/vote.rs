//! Vote commands.

#![allow(clippy::print_stdout)] // command output goes to stdout by design of the CLI

use shelfscan_core::{Ean, Vote};

/// Cast, flip, or clear a vote, then print the refetched counts.
///
/// Looking the product up first populates the cache, so the optimistic
/// prediction has something to work on; the final lookup after the
/// mutation's staleness mark shows the server's authoritative counts.
///
/// # Errors
///
/// Returns an error on an invalid barcode or a failed mutation.
pub async fn cast(ean: &str, vote: Option<bool>) -> Result<(), Box<dyn std::error::Error>> {
    let ean: Ean = ean.parse()?;
    let data = super::data_layer().await?;

    // Prime the cache with the current snapshot.
    let before = data.catalog().product(&ean).await?;
    tracing::info!(
        up = before.up_votes,
        down = before.down_votes,
        "current counts"
    );

    match vote {
        Some(up) => data.votes().set_vote(&ean, Vote::from(up)).await?,
        None => data.votes().clear_vote(&ean).await?,
    }

    // The mutation marked the entry stale; this read refetches.
    let after = data.catalog().product(&ean).await?;
    println!("{}", serde_json::to_string_pretty(&after)?);
    Ok(())
}
