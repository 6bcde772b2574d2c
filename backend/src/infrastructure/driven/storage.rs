use std::path::{Component, Path, PathBuf};

use axum::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::application::ports::PhotoStorage;
use crate::error::{AppError, Result};

/// Keeps uploaded photos under a local directory that the HTTP layer serves
/// at `public_base_url`.
pub struct LocalPhotoStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalPhotoStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(AppError::Storage(format!("invalid storage key: {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn store(&self, key: &str, data: Bytes) -> Result<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &data).await?;
        tracing::debug!(key, bytes = data.len(), "Stored photo");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
