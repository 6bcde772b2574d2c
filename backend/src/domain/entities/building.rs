use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::ConfidenceLevel;

/// Reference entry for a physical address and its static attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Uuid,
    pub district_id: Uuid,
    pub street: String,
    pub house_number: String,
    pub full_address: String,
    pub total_floors: Option<i32>,
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub entrance_count: Option<i32>,
    pub building_type: Option<String>,
    pub has_elevator: bool,
    pub has_garbage_chute: bool,
    pub heating_type: Option<String>,
    pub layout: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub data_source: Option<String>,
    pub confidence_level: ConfidenceLevel,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Building {
    /// New manually entered building. Street and house number are trimmed
    /// and must not be empty.
    pub fn new(district_id: Uuid, street: &str, house_number: &str) -> Result<Self, String> {
        let street = street.trim();
        let house_number = house_number.trim();
        if street.is_empty() || house_number.is_empty() {
            return Err("District, street, and house number are required".to_string());
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            district_id,
            street: street.to_string(),
            house_number: house_number.to_string(),
            full_address: full_address(street, house_number),
            total_floors: None,
            year_built: None,
            wall_material: None,
            entrance_count: None,
            building_type: None,
            has_elevator: false,
            has_garbage_chute: false,
            heating_type: None,
            layout: None,
            latitude: None,
            longitude: None,
            data_source: Some("manual".to_string()),
            confidence_level: ConfidenceLevel::Medium,
            is_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves the building to a new street address, keeping `full_address`
    /// in sync.
    pub fn relocate(&mut self, street: Option<&str>, house_number: Option<&str>) {
        if let Some(street) = street.map(str::trim).filter(|s| !s.is_empty()) {
            self.street = street.to_string();
        }
        if let Some(number) = house_number.map(str::trim).filter(|s| !s.is_empty()) {
            self.house_number = number.to_string();
        }
        self.full_address = full_address(&self.street, &self.house_number);
    }
}

pub fn full_address(street: &str, house_number: &str) -> String {
    format!("{}, {}", street.trim(), house_number.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_building_trims_and_builds_full_address() {
        let building = Building::new(Uuid::new_v4(), " Ленина ", " 10а ").unwrap();
        assert_eq!(building.street, "Ленина");
        assert_eq!(building.house_number, "10а");
        assert_eq!(building.full_address, "Ленина, 10а");
        assert_eq!(building.confidence_level, ConfidenceLevel::Medium);
        assert_eq!(building.data_source.as_deref(), Some("manual"));
        assert!(building.is_active && !building.is_verified);
    }

    #[test]
    fn relocate_rebuilds_full_address() {
        let mut building = Building::new(Uuid::new_v4(), "Ленина", "10").unwrap();
        building.relocate(None, Some("12"));
        assert_eq!(building.full_address, "Ленина, 12");
        building.relocate(Some("Мира"), None);
        assert_eq!(building.full_address, "Мира, 12");
    }

    #[test]
    fn empty_house_number_is_rejected() {
        assert!(Building::new(Uuid::new_v4(), "Ленина", "  ").is_err());
    }
}
