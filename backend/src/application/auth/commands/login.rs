use chrono::Utc;
use shared::{LoginRequest, LoginResponse};

use crate::application::auth::{password, TokenSigner};
use crate::application::ports::UserRepository;
use crate::application::views::profile;
use crate::domain::Email;
use crate::error::{AppError, Result};

pub async fn execute<R: UserRepository + ?Sized>(
    users: &R,
    signer: &TokenSigner,
    request: LoginRequest,
) -> Result<LoginResponse> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let email = Email::new(request.email).map_err(|_| invalid())?;
    let user = users.find_by_email(&email).await?.ok_or_else(invalid)?;
    if !user.can_sign_in() {
        return Err(invalid());
    }
    let hash = user.password_hash().ok_or_else(invalid)?;
    if !password::verify(&request.password, hash) {
        tracing::info!(user_id = %user.id(), "Rejected sign-in attempt");
        return Err(invalid());
    }

    users.record_login(user.id(), Utc::now()).await?;
    let token = signer.issue(&user)?;
    tracing::info!(user_id = %user.id(), role = user.role().as_db_str(), "User signed in");

    Ok(LoginResponse {
        token,
        user: profile(&user),
    })
}
