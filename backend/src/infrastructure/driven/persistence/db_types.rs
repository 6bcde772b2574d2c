//! Row shapes as stored in SQLite and their conversion into domain types.
//! Ids are UUID text, flags are 0/1 integers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{
    Building, CallAssignment, Category, ConfidenceLevel, DisplayName, District, Email, HistoryAction, Property,
    PropertyHistory, PropertyPhoto, PropertyStatus, User, UserId, UserRole,
};
use crate::error::{AppError, Result};

fn corrupt(what: &str, detail: impl std::fmt::Display) -> AppError {
    AppError::Database(format!("corrupt {} in database: {}", what, detail))
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| corrupt("id", e))
}

fn parse_optional_uuid(raw: Option<String>) -> Result<Option<Uuid>> {
    raw.as_deref().map(parse_uuid).transpose()
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    parse_uuid(raw).map(UserId::from_uuid)
}

#[derive(Debug, FromRow)]
pub struct DbUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<DbUser> for User {
    type Error = AppError;

    fn try_from(row: DbUser) -> Result<Self> {
        Ok(User::from_persistence(
            parse_user_id(&row.id)?,
            Email::new(row.email).map_err(|e| corrupt("email", e))?,
            DisplayName::new(row.name).map_err(|e| corrupt("name", e))?,
            UserRole::from_str(&row.role).map_err(|e| corrupt("role", e))?,
            row.password_hash,
            row.is_active,
            row.created_at,
            row.last_login_at,
        ))
    }
}

/// A user as referenced from another record.
#[derive(Debug, FromRow)]
pub struct DbPerson {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Districts and categories share one shape.
#[derive(Debug, FromRow)]
pub struct DbNamedEntity {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbNamedEntity> for District {
    type Error = AppError;

    fn try_from(row: DbNamedEntity) -> Result<Self> {
        Ok(District {
            id: parse_uuid(&row.id)?,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbNamedEntity> for Category {
    type Error = AppError;

    fn try_from(row: DbNamedEntity) -> Result<Self> {
        Ok(Category {
            id: parse_uuid(&row.id)?,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct DbBuilding {
    pub id: String,
    pub district_id: String,
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
    pub confidence_level: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbBuilding> for Building {
    type Error = AppError;

    fn try_from(row: DbBuilding) -> Result<Self> {
        Ok(Building {
            id: parse_uuid(&row.id)?,
            district_id: parse_uuid(&row.district_id)?,
            street: row.street,
            house_number: row.house_number,
            full_address: row.full_address,
            total_floors: row.total_floors,
            year_built: row.year_built,
            wall_material: row.wall_material,
            entrance_count: row.entrance_count,
            building_type: row.building_type,
            has_elevator: row.has_elevator,
            has_garbage_chute: row.has_garbage_chute,
            heating_type: row.heating_type,
            layout: row.layout,
            latitude: row.latitude,
            longitude: row.longitude,
            data_source: row.data_source,
            confidence_level: ConfidenceLevel::from_str(&row.confidence_level)
                .map_err(|e| corrupt("confidence level", e))?,
            is_verified: row.is_verified,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct DbProperty {
    pub id: String,
    pub category_id: String,
    pub district_id: Option<String>,
    pub building_id: Option<String>,
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
    pub status: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_archived: bool,
    pub created_by_id: String,
    pub assigned_to_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbProperty> for Property {
    type Error = AppError;

    fn try_from(row: DbProperty) -> Result<Self> {
        Ok(Property {
            id: parse_uuid(&row.id)?,
            category_id: parse_uuid(&row.category_id)?,
            district_id: parse_optional_uuid(row.district_id)?,
            building_id: parse_optional_uuid(row.building_id)?,
            apartment: row.apartment,
            floor: row.floor,
            total_floors: row.total_floors,
            total_area: row.total_area,
            living_area: row.living_area,
            kitchen_area: row.kitchen_area,
            rooms: row.rooms,
            ceiling_height: row.ceiling_height,
            balcony: row.balcony,
            loggia: row.loggia,
            layout: row.layout,
            wall_material: row.wall_material,
            condition: row.condition,
            year_built: row.year_built,
            phone: row.phone,
            source: row.source,
            renovation: row.renovation,
            p_field: row.p_field,
            price: row.price,
            price_per_sqm: row.price_per_sqm,
            currency: row.currency,
            status: PropertyStatus::from_str(&row.status).map_err(|e| corrupt("status", e))?,
            description: row.description,
            notes: row.notes,
            is_archived: row.is_archived,
            created_by_id: parse_user_id(&row.created_by_id)?,
            assigned_to_id: row.assigned_to_id.as_deref().map(parse_user_id).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct DbPhoto {
    pub id: String,
    pub property_id: String,
    pub filename: String,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbPhoto> for PropertyPhoto {
    type Error = AppError;

    fn try_from(row: DbPhoto) -> Result<Self> {
        Ok(PropertyPhoto {
            id: parse_uuid(&row.id)?,
            property_id: parse_uuid(&row.property_id)?,
            filename: row.filename,
            url: row.url,
            caption: row.caption,
            is_primary: row.is_primary,
            created_at: row.created_at,
        })
    }
}

/// History entry joined with the name and email of its author.
#[derive(Debug, FromRow)]
pub struct DbHistory {
    pub id: String,
    pub property_id: String,
    pub user_id: String,
    pub action: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl DbHistory {
    pub fn into_entry(self) -> Result<(PropertyHistory, Option<(String, String)>)> {
        let author = self.user_name.zip(self.user_email);
        let entry = PropertyHistory {
            id: parse_uuid(&self.id)?,
            property_id: parse_uuid(&self.property_id)?,
            user_id: parse_user_id(&self.user_id)?,
            action: HistoryAction::from_str(&self.action).map_err(|e| corrupt("history action", e))?,
            notes: self.notes,
            created_at: self.created_at,
        };
        Ok((entry, author))
    }
}

#[derive(Debug, FromRow)]
pub struct DbCallAssignment {
    pub id: String,
    pub property_id: String,
    pub agent_id: String,
    pub is_called: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbCallAssignment> for CallAssignment {
    type Error = AppError;

    fn try_from(row: DbCallAssignment) -> Result<Self> {
        Ok(CallAssignment {
            id: parse_uuid(&row.id)?,
            property_id: parse_uuid(&row.property_id)?,
            agent_id: parse_user_id(&row.agent_id)?,
            is_called: row.is_called,
            created_at: row.created_at,
        })
    }
}

/// Converts every row or fails on the first corrupt one.
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}
