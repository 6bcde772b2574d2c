use axum::async_trait;
use chrono::{DateTime, Utc};

use crate::application::views::UserSummary;
use crate::domain::{Email, User, UserId, UserRole};
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>>;
    async fn insert(&self, user: &User) -> Result<()>;
    async fn update(&self, user: &User) -> Result<()>;
    /// Newest first, with the number of listings each user created and holds.
    async fn list(&self, role: Option<UserRole>) -> Result<Vec<UserSummary>>;
    async fn count_active_admins(&self) -> Result<i64>;
    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<()>;
}
