use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{PropertyStatus, UserId};

/// A listing. Realtor leads carry only category, phone and status, so
/// district and building are optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub category_id: Uuid,
    pub district_id: Option<Uuid>,
    pub building_id: Option<Uuid>,
    pub apartment: Option<String>,
    pub floor: Option<i32>,
    pub total_floors: Option<i32>,
    pub total_area: Option<f64>,
    pub living_area: Option<f64>,
    pub kitchen_area: Option<f64>,
    pub rooms: Option<i32>,
    pub ceiling_height: Option<f64>,
    pub balcony: Option<String>,
    pub loggia: bool,
    pub layout: Option<String>,
    pub wall_material: Option<String>,
    pub condition: Option<String>,
    pub year_built: Option<i32>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub renovation: Option<String>,
    pub p_field: Option<String>,
    pub price: Option<f64>,
    pub price_per_sqm: Option<f64>,
    pub currency: Option<String>,
    pub status: PropertyStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_archived: bool,
    pub created_by_id: UserId,
    pub assigned_to_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Empty active listing owned and worked by `author`.
    pub fn new(category_id: Uuid, author: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id,
            district_id: None,
            building_id: None,
            apartment: None,
            floor: None,
            total_floors: None,
            total_area: None,
            living_area: None,
            kitchen_area: None,
            rooms: None,
            ceiling_height: None,
            balcony: None,
            loggia: false,
            layout: None,
            wall_material: None,
            condition: None,
            year_built: None,
            phone: None,
            source: None,
            renovation: None,
            p_field: None,
            price: None,
            price_per_sqm: None,
            currency: None,
            status: PropertyStatus::Active,
            description: None,
            notes: None,
            is_archived: false,
            created_by_id: author,
            assigned_to_id: Some(author),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_worked_by(&self, user: &UserId) -> bool {
        self.created_by_id == *user || self.assigned_to_id.as_ref() == Some(user)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPhoto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub filename: String,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl PropertyPhoto {
    pub fn new(property_id: Uuid, url: String, filename: String, caption: Option<String>, is_primary: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            filename,
            url,
            caption,
            is_primary,
            created_at: Utc::now(),
        }
    }
}
