use shared::SetupStatusResponse;

use crate::application::ports::UserRepository;
use crate::error::Result;

pub async fn execute<R: UserRepository + ?Sized>(users: &R) -> Result<SetupStatusResponse> {
    let admins = users.count_active_admins().await?;
    Ok(SetupStatusResponse { needs_setup: admins == 0 })
}
