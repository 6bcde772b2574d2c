use axum::async_trait;
use uuid::Uuid;

use crate::domain::District;
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistrictRepository: Send + Sync {
    /// Active districts ordered by name.
    async fn list_active(&self) -> Result<Vec<District>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<District>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<District>>;
    async fn insert(&self, district: &District) -> Result<()>;
}
