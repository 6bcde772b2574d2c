use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    Active,
    Reserved,
    Sold,
    Rented,
    Suspended,
    Inactive,
    Busy,
    Available,
    OnVacation,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 9] = [
        PropertyStatus::Active,
        PropertyStatus::Reserved,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
        PropertyStatus::Suspended,
        PropertyStatus::Inactive,
        PropertyStatus::Busy,
        PropertyStatus::Available,
        PropertyStatus::OnVacation,
    ];

    pub fn as_db_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "ACTIVE",
            PropertyStatus::Reserved => "RESERVED",
            PropertyStatus::Sold => "SOLD",
            PropertyStatus::Rented => "RENTED",
            PropertyStatus::Suspended => "SUSPENDED",
            PropertyStatus::Inactive => "INACTIVE",
            PropertyStatus::Busy => "BUSY",
            PropertyStatus::Available => "AVAILABLE",
            PropertyStatus::OnVacation => "ON_VACATION",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_db_str() == wanted)
            .ok_or_else(|| format!("Unknown property status: {}", s))
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}
