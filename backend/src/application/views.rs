//! Read models returned by the use cases: entities joined with the records
//! they reference, shaped the way the API serializes them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    Building, CallAssignment, Category, District, HistoryAction, Property, PropertyHistory,
    PropertyPhoto, User, UserId, UserRole,
};

/// Name and email of a user referenced by another record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRef {
    pub name: String,
    pub email: String,
}

impl From<&User> for PersonRef {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name().as_str().to_string(),
            email: user.email().as_str().to_string(),
        }
    }
}

pub fn profile(user: &User) -> shared::UserProfile {
    shared::UserProfile {
        id: user.id().to_string(),
        email: user.email().as_str().to_string(),
        name: user.display_name().as_str().to_string(),
        role: user.role().as_db_str().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingView {
    #[serde(flatten)]
    pub building: Building,
    pub district: Option<District>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryView {
    #[serde(flatten)]
    pub entry: PropertyHistory,
    pub user: Option<PersonRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    #[serde(flatten)]
    pub property: Property,
    pub category: Option<Category>,
    pub district: Option<District>,
    pub building: Option<Building>,
    pub created_by: Option<PersonRef>,
    pub assigned_to: Option<PersonRef>,
    pub photos: Vec<PropertyPhoto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_assignments: Option<Vec<CallAssignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histories: Option<Vec<HistoryEntryView>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCounts {
    pub created_properties: i64,
    pub assigned_properties: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub counts: Option<PropertyCounts>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            email: user.email().as_str().to_string(),
            name: user.display_name().as_str().to_string(),
            role: user.role(),
            is_active: user.is_active(),
            created_at: user.created_at(),
            last_login_at: user.last_login_at(),
            counts: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_properties: i64,
    pub active_properties: i64,
    pub sold_properties: i64,
    pub rented_properties: i64,
    pub total_users: i64,
    pub active_users: i64,
    pub total_categories: i64,
    pub total_districts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBreakdown {
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<NamedCount>,
    pub by_district: Vec<NamedCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceStats {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRef {
    pub id: Uuid,
    /// `"street, house"` plus the apartment when known.
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: Uuid,
    pub action: HistoryAction,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: Option<PersonRef>,
    pub property: PropertyRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub overview: Overview,
    pub properties: PropertyBreakdown,
    pub prices: PriceStats,
    pub recent_activities: Vec<RecentActivity>,
}

pub fn property_address(street: Option<&str>, house_number: Option<&str>, apartment: Option<&str>) -> Option<String> {
    let (street, house_number) = (street?, house_number?);
    let mut address = format!("{}, {}", street, house_number);
    if let Some(apartment) = apartment.filter(|a| !a.is_empty()) {
        address.push_str(", кв. ");
        address.push_str(apartment);
    }
    Some(address)
}
