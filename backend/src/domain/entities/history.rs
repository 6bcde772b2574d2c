use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{HistoryAction, UserId};

/// One line of the audit trail kept for every listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyHistory {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: UserId,
    pub action: HistoryAction,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PropertyHistory {
    pub fn record(property_id: Uuid, user_id: UserId, action: HistoryAction, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            action,
            notes,
            created_at: Utc::now(),
        }
    }
}
