use axum::async_trait;
use bytes::Bytes;

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Stores `data` under `key` and returns the public URL of the object.
    async fn store(&self, key: &str, data: Bytes) -> Result<String>;
}
