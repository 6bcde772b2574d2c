use shared::UserProfile;

use crate::application::ports::UserRepository;
use crate::application::views::profile;
use crate::domain::UserId;
use crate::error::{AppError, Result};

/// Profile of the signed-in user. A deactivated account loses access even
/// while its token is still valid.
pub async fn execute<R: UserRepository + ?Sized>(users: &R, id: &UserId) -> Result<UserProfile> {
    let user = users
        .find_by_id(id)
        .await?
        .filter(|user| user.is_active())
        .ok_or_else(|| AppError::Unauthorized("Account is not available".to_string()))?;
    Ok(profile(&user))
}
