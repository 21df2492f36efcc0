// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! On-disk refresh token storage.
//!
//! The file holds the raw token and nothing else. It is replaced wholesale
//! after every successful token exchange.

use crate::error::{Result, SyncError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Refresh token file.
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    path: PathBuf,
}

impl RefreshTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored refresh token.
    ///
    /// A missing file and a blank file both mean "first run" and yield `None`.
    pub async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Overwrite the stored refresh token.
    pub async fn save(&self, refresh_token: &str) -> Result<()> {
        tokio::fs::write(&self.path, refresh_token.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| self.io_error(e))?;
        }

        tracing::debug!(path = %self.path.display(), "Refresh token stored");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SyncError {
        SyncError::TokenStore {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = RefreshTokenStore::new(dir.path().join("refreshToken.txt"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refreshToken.txt");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(RefreshTokenStore::new(path).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refreshToken.txt");
        let store = RefreshTokenStore::new(&path);

        store.save("a-much-longer-first-token").await.unwrap();
        store.save("short").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
        assert_eq!(store.load().await.unwrap().as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_unwritable_path_is_token_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RefreshTokenStore::new(dir.path().join("missing").join("token.txt"));
        let err = store.save("abc").await.unwrap_err();
        assert!(matches!(err, SyncError::TokenStore { .. }));
    }
}
