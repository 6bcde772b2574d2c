use serde::{Deserialize, Serialize};

use crate::patch::double_option;

// ---------------------------------------------------------------------------
// Auth & setup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusResponse {
    pub needs_setup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupAdminRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Body for creating a district or a category.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub district_id: Option<String>,
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub total_floors: Option<i32>,
    pub layout: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingRequest {
    pub district_id: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub total_floors: Option<i32>,
    pub layout: Option<String>,
    pub has_elevator: Option<bool>,
    pub entrance_count: Option<i32>,
    pub building_type: Option<String>,
    pub heating_type: Option<String>,
    pub has_garbage_chute: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub data_source: Option<String>,
    pub confidence_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildingRequest {
    pub district_id: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub total_floors: Option<i32>,
    pub layout: Option<String>,
    pub has_elevator: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { page, limit, total, pages }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSearchQuery {
    pub q: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub district_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressQuery {
    pub district_id: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearReferenceQuery {
    pub year: i32,
    pub district: Option<String>,
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Query string of the listing table. Lists are comma separated, ranges are
/// `min,max` with either side optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub include_archived: Option<bool>,
    pub category: Option<String>,
    pub district: Option<String>,
    pub status: Option<String>,
    pub layout: Option<String>,
    pub wall_material: Option<String>,
    pub balcony_type: Option<String>,
    pub p_field: Option<String>,
    pub condition: Option<String>,
    pub source: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub total_area: Option<String>,
    pub kitchen_area: Option<String>,
    pub floor: Option<String>,
    pub year_built: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoInput {
    pub url: String,
    pub name: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub category_id: Option<String>,
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
    pub loggia: Option<bool>,
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
    pub status: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub photos: Option<Vec<PhotoInput>>,
}

/// Partial update of a listing: an absent field is left alone, `null`
/// clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub district_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub building_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub apartment: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub floor: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_floors: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_area: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub living_area: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub kitchen_area: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ceiling_height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub balcony: Option<Option<String>>,
    pub loggia: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub layout: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub wall_material: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub condition: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub year_built: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub renovation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub p_field: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price_per_sqm: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub currency: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub is_archived: Option<bool>,
    pub photos: Option<Vec<PhotoInput>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAssignmentRequest {
    #[serde(default)]
    pub property_ids: Vec<String>,
    pub agent_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedPhoto {
    pub url: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

// ---------------------------------------------------------------------------
// Generic envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        assert_eq!(Pagination::new(1, 20, 41).pages, 3);
        assert_eq!(Pagination::new(1, 20, 40).pages, 2);
        assert_eq!(Pagination::new(1, 20, 0).pages, 0);
    }

    #[test]
    fn update_request_keeps_explicit_nulls() {
        let req: UpdatePropertyRequest =
            serde_json::from_str(r#"{"districtId":null,"price":1500000,"loggia":true}"#).unwrap();
        assert_eq!(req.district_id, Some(None));
        assert_eq!(req.price, Some(Some(1_500_000.0)));
        assert_eq!(req.loggia, Some(true));
        assert!(req.building_id.is_none());
        assert!(req.photos.is_none());
    }

    #[test]
    fn uploaded_photo_uses_type_key() {
        let json = serde_json::to_value(UploadedPhoto {
            url: "/uploads/a.jpg".into(),
            name: "a.jpg".into(),
            size: 10,
            content_type: "image/jpeg".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "image/jpeg");
    }
}
