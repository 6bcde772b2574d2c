use axum::async_trait;
use uuid::Uuid;

use crate::domain::Category;
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Active categories ordered by name.
    async fn list_active(&self) -> Result<Vec<Category>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn insert(&self, category: &Category) -> Result<()>;
}
