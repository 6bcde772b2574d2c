use std::str::FromStr;

use shared::CreateUserRequest;

use crate::application::auth::password;
use crate::application::ports::UserRepository;
use crate::application::views::UserSummary;
use crate::domain::{DisplayName, Email, User, UserRole};
use crate::error::{AppError, Result};

pub async fn execute<R: UserRepository + ?Sized>(users: &R, request: CreateUserRequest) -> Result<UserSummary> {
    let required = || AppError::Validation("Email, name, and role are required".to_string());
    let email = request.email.filter(|e| !e.trim().is_empty()).ok_or_else(required)?;
    let name = request.name.filter(|n| !n.trim().is_empty()).ok_or_else(required)?;
    let role = request.role.filter(|r| !r.trim().is_empty()).ok_or_else(required)?;

    let email = Email::new(email).map_err(AppError::Validation)?;
    let name = DisplayName::new(name).map_err(AppError::Validation)?;
    let role = UserRole::from_str(&role).map_err(AppError::Validation)?;

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".to_string()));
    }

    let mut user = User::new(email, name, role);
    if let Some(secret) = request.password.filter(|p| !p.is_empty()) {
        user.set_password_hash(password::hash(&secret)?);
    }
    users.insert(&user).await?;

    tracing::info!(user_id = %user.id(), role = role.as_db_str(), "User created");
    Ok(UserSummary::from(&user))
}
