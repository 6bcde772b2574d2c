use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl District {
    pub fn new(name: String, description: Option<String>) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            is_active: true,
            created_at: Utc::now(),
        })
    }
}
