use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::UserId;

/// A listing an agent has been asked to phone. Open assignments pin the
/// listing to the top of the agent's table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAssignment {
    pub id: Uuid,
    pub property_id: Uuid,
    pub agent_id: UserId,
    pub is_called: bool,
    pub created_at: DateTime<Utc>,
}

impl CallAssignment {
    pub fn new(property_id: Uuid, agent_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            agent_id,
            is_called: false,
            created_at: Utc::now(),
        }
    }
}
