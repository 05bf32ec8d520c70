use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};

/// Persistence seam for the single map access credential. Injected into the
/// viewport controller so nothing holds process-global state.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// File-backed store: one token string under one fixed path
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                // An unreadable credential behaves like an absent one; the
                // user re-enters it through the credential affordance.
                tracing::warn!("Failed to read map credential from {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!("Failed to create credential directory: {}", e);
                AppError::Internal("Failed to persist map credential".to_string())
            })?;
        }

        tokio::fs::write(&self.path, token).await.map_err(|e| {
            tracing::error!("Failed to write map credential: {}", e);
            AppError::Internal("Failed to persist map credential".to_string())
        })?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!("Failed to remove map credential: {}", e);
                Err(AppError::Internal(
                    "Failed to clear map credential".to_string(),
                ))
            }
        }
    }
}

/// Volatile store for tests
#[cfg(test)]
pub struct InMemoryCredentialStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl InMemoryCredentialStore {
    pub fn empty() -> Self {
        Self {
            token: std::sync::Mutex::new(None),
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/map_credential"));

        assert_eq!(store.load().await.unwrap(), None);

        store.save("pk.test-token").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("pk.test-token".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);

        // Clearing an already-absent credential is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map_credential");
        tokio::fs::write(&path, "  \n").await.unwrap();

        let store = FileCredentialStore::new(path);
        assert_eq!(store.load().await.unwrap(), None);
    }
}
