//! Persisted badge set.
//!
//! Earned badges are local-only UI state: a set of string identifiers in a
//! `badges.json` document under the data directory. The set is loaded once
//! at construction and every insertion persists before returning, via a
//! temp-file rename so a torn write never corrupts the stored set.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Name of the badge document under the data directory.
const BADGES_FILE: &str = "badges.json";

/// Errors that can occur loading or persisting badges.
#[derive(Debug, Error)]
pub enum BadgeStoreError {
    /// Filesystem access failed.
    #[error("badge store I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored document could not be parsed.
    #[error("badge store parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape: `{ "badges": ["first-scan", ...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BadgeFile {
    badges: Vec<String>,
}

/// Durable, idempotent set of earned badge identifiers.
///
/// Insertion order is preserved; there is no removal. Writes are
/// serialized by an internal mutex, so concurrent `add` calls cannot
/// interleave their persists.
#[derive(Debug)]
pub struct BadgeStore {
    path: PathBuf,
    badges: Mutex<Vec<String>>,
}

impl BadgeStore {
    /// Load the badge set from the data directory.
    ///
    /// A missing document means no badges earned yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or
    /// parsed.
    pub async fn load(data_dir: &Path) -> Result<Self, BadgeStoreError> {
        let path = data_dir.join(BADGES_FILE);

        let badges = match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice::<BadgeFile>(&raw)?.badges,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            badges: Mutex::new(badges),
        })
    }

    /// Add a badge to the set.
    ///
    /// Adding a badge that is already present is a no-op (and does not
    /// touch the disk). Returns `true` if the badge was newly inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the enlarged set fails; the
    /// in-memory set is left unchanged in that case.
    pub async fn add(&self, badge: &str) -> Result<bool, BadgeStoreError> {
        let mut badges = self.badges.lock().await;
        if badges.iter().any(|b| b == badge) {
            return Ok(false);
        }

        let mut next = badges.clone();
        next.push(badge.to_owned());
        self.persist(&next).await?;

        *badges = next;
        debug!(badge, "badge earned");
        Ok(true)
    }

    /// Whether a badge has been earned.
    pub async fn contains(&self, badge: &str) -> bool {
        self.badges.lock().await.iter().any(|b| b == badge)
    }

    /// Snapshot of all earned badges, in insertion order.
    pub async fn badges(&self) -> Vec<String> {
        self.badges.lock().await.clone()
    }

    /// Write the document atomically (temp file + rename).
    async fn persist(&self, badges: &[String]) -> Result<(), BadgeStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = serde_json::to_vec_pretty(&BadgeFile {
            badges: badges.to_vec(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, document).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
