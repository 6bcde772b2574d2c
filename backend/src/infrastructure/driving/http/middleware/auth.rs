use std::str::FromStr;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::application::Actor;
use crate::domain::{UserId, UserRole};
use crate::error::AppError;
use crate::infrastructure::AppState;

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        extract(parts, state)
    }
}

fn extract(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, AppError> {
    let token = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

    let claims = state.tokens.verify(token)?;
    let id = UserId::from_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;
    let role = UserRole::from_str(&claims.role)
        .map_err(|_| AppError::Unauthorized("Invalid role in token".to_string()))?;

    Ok(AuthenticatedUser {
        id,
        email: claims.email,
        role,
    })
}
