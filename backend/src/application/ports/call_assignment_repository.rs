use axum::async_trait;
use uuid::Uuid;

use crate::domain::{CallAssignment, PropertyHistory, UserId};
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallAssignmentRepository: Send + Sync {
    /// Inserts the assignments, skipping pairs that already exist, and writes
    /// the history entries in the same transaction. Returns how many
    /// assignments were new.
    async fn assign(&self, assignments: &[CallAssignment], history: &[PropertyHistory]) -> Result<u64>;
    async fn find(&self, id: Uuid) -> Result<Option<CallAssignment>>;
    async fn for_agent(&self, agent: &UserId, property_ids: &[Uuid]) -> Result<Vec<CallAssignment>>;
    /// Records the confirmation and drops the assignment.
    async fn confirm(&self, id: Uuid, history: &PropertyHistory) -> Result<()>;
}
