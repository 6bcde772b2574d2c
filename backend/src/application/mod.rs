// Application layer - use cases grouped by area
// Orchestrates domain logic through the driven ports

use uuid::Uuid;

use crate::domain::{UserId, UserRole};
use crate::error::{AppError, Result};

pub mod auth;
pub mod admin;
pub mod catalog;
pub mod listings;
pub mod ports;
pub mod views;

/// The signed-in user a use case runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub fn is_agent(&self) -> bool {
        self.role == UserRole::Agent
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
    }

    pub fn require_staff(&self) -> Result<()> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
    }

    pub fn require_listing_access(&self) -> Result<()> {
        if self.role.works_with_listings() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
    }
}

/// Ids that do not parse cannot name an existing record.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}
