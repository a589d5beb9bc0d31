//! Session token storage.
//!
//! The session token lives in a single `session` file under the data
//! directory, standing in for the platform keychain the app uses on device.
//! The gateway reads it before every request; login/logout flows (out of
//! scope here) write and clear it.

use std::io;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Name of the token file under the data directory.
const SESSION_FILE: &str = "session";

/// Errors that can occur reading or writing the session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Filesystem access failed.
    #[error("session store I/O error: {0}")]
    Io(#[from] io::Error),
}

/// File-backed store for the session bearer token.
///
/// Reads are performed per request, not cached: a token written by a
/// concurrent login flow is picked up by the very next request.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// Read the current session token.
    ///
    /// Returns `Ok(None)` when no token has been stored (missing file or
    /// empty content).
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Io` if the file exists but cannot be read.
    pub async fn token(&self) -> Result<Option<SecretString>, SessionStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_owned())))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a session token, creating the data directory if needed.
    ///
    /// On Unix the file is restricted to owner read/write.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Io` if the directory or file cannot be
    /// written.
    pub async fn store(&self, token: &SecretString) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, token.expose_secret()).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, perms).await?;
        }

        Ok(())
    }

    /// Remove the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Io` on filesystem errors other than the
    /// file already being absent.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store
            .store(&SecretString::from("tok-123".to_string()))
            .await
            .unwrap();

        let token = store.token().await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "tok-123");
    }

    #[tokio::test]
    async fn test_whitespace_only_is_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        tokio::fs::write(dir.path().join(SESSION_FILE), "\n  \n")
            .await
            .unwrap();
        assert!(store.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store
            .store(&SecretString::from("tok".to_string()))
            .await
            .unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.token().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .store(&SecretString::from("tok".to_string()))
            .await
            .unwrap();

        let mode = std::fs::metadata(dir.path().join(SESSION_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
