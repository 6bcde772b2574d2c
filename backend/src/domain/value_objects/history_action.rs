use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Created,
    Updated,
    Archived,
    Restored,
    Assigned,
}

impl HistoryAction {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            HistoryAction::Created => "CREATED",
            HistoryAction::Updated => "UPDATED",
            HistoryAction::Archived => "ARCHIVED",
            HistoryAction::Restored => "RESTORED",
            HistoryAction::Assigned => "ASSIGNED",
        }
    }
}

impl FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(HistoryAction::Created),
            "UPDATED" => Ok(HistoryAction::Updated),
            "ARCHIVED" => Ok(HistoryAction::Archived),
            "RESTORED" => Ok(HistoryAction::Restored),
            "ASSIGNED" => Ok(HistoryAction::Assigned),
            other => Err(format!("Unknown history action: {}", other)),
        }
    }
}
