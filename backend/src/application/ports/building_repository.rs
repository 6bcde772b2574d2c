use axum::async_trait;
use uuid::Uuid;

use crate::application::views::BuildingView;
use crate::domain::Building;
use crate::error::Result;

/// Filters of the admin building table. Every field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingFilter {
    pub district_id: Option<Uuid>,
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub total_floors: Option<i32>,
    pub layout: Option<String>,
    /// Substring of the full address, street or house number.
    pub search: Option<String>,
}

/// How the autocomplete looks for buildings. All modes only see active
/// buildings and may be narrowed to one district.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildingSearch {
    /// Street and house number given separately; at most one hit.
    Exact { street: String, house_number: String },
    /// Free text split into its parts.
    Parsed {
        street: String,
        house_number: Option<String>,
    },
    /// Free text that could not be split.
    Term(String),
    Recent,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    /// One page of active buildings, newest first, plus the total match count.
    async fn list(&self, filter: &BuildingFilter, page: i64, limit: i64) -> Result<(Vec<BuildingView>, i64)>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Building>>;
    async fn find_view(&self, id: Uuid) -> Result<Option<BuildingView>>;
    /// Any building, active or not, at this exact address.
    async fn find_by_address(&self, district_id: Uuid, street: &str, house_number: &str) -> Result<Option<Building>>;
    async fn insert(&self, building: &Building) -> Result<()>;
    async fn update(&self, building: &Building) -> Result<()>;
    /// Returns false when no building has this id.
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
    async fn search(&self, search: &BuildingSearch, district_id: Option<Uuid>, limit: i64) -> Result<Vec<BuildingView>>;
    /// Active buildings of a district ordered by street then house number.
    async fn in_district(&self, district_id: Uuid) -> Result<Vec<BuildingView>>;
    async fn active_at_address(&self, district_id: Uuid, street: &str, house_number: &str) -> Result<Option<BuildingView>>;
}
