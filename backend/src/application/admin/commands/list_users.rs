use std::str::FromStr;

use shared::UsersQuery;

use crate::application::ports::UserRepository;
use crate::application::views::UserSummary;
use crate::application::Actor;
use crate::domain::UserRole;
use crate::error::{AppError, Result};

/// The agent directory is open to every signed-in user so listings can be
/// handed out; any other listing of accounts is for administrators.
pub async fn execute<R: UserRepository + ?Sized>(
    users: &R,
    actor: &Actor,
    query: UsersQuery,
) -> Result<Vec<UserSummary>> {
    let role = query
        .role
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(UserRole::from_str)
        .transpose()
        .map_err(AppError::Validation)?;

    if role != Some(UserRole::Agent) && actor.role != UserRole::Admin {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    users.list(role).await
}
