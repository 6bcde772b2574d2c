use axum::async_trait;
use uuid::Uuid;

use crate::application::views::{HistoryEntryView, PropertyView};
use crate::domain::{Property, PropertyHistory, PropertyPhoto, UserId};
use crate::error::Result;

/// Inclusive bounds; a missing side is open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRange {
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Listing table filters. Empty lists and open ranges do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Archived listings are shown instead of the active ones, never together.
    pub archived: bool,
    pub category_ids: Vec<String>,
    pub district_ids: Vec<String>,
    pub statuses: Vec<String>,
    pub layouts: Vec<String>,
    /// Matched against the listing's building.
    pub wall_materials: Vec<String>,
    pub balcony_types: Vec<String>,
    pub p_fields: Vec<String>,
    pub condition: Option<String>,
    pub source: Option<String>,
    pub price: NumberRange,
    pub total_area: NumberRange,
    pub kitchen_area: NumberRange,
    pub floor: NumberRange,
    pub year_built: NumberRange,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub description: Option<String>,
    pub exclude_ids: Vec<Uuid>,
}

/// Everything written by one listing update, applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChangeSet {
    pub property: Property,
    /// `Some` replaces the photo set.
    pub photos: Option<Vec<PropertyPhoto>>,
    pub history: Option<PropertyHistory>,
    /// Marks this agent's open call assignments for the listing as called.
    pub close_assignments_for: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// One page of listings, newest first, with the total match count.
    async fn list(&self, filter: &PropertyFilter, page: i64, limit: i64) -> Result<(Vec<PropertyView>, i64)>;
    /// Listings with an open call assignment for `agent`.
    async fn pinned_for(&self, agent: &UserId, archived: bool) -> Result<Vec<PropertyView>>;
    async fn find(&self, id: Uuid) -> Result<Option<Property>>;
    async fn find_view(&self, id: Uuid) -> Result<Option<PropertyView>>;
    async fn create(&self, property: &Property, photos: &[PropertyPhoto], history: &PropertyHistory) -> Result<()>;
    async fn update(&self, changes: &PropertyChangeSet) -> Result<()>;
    /// Flips the archive flag and records `history`. Returns false when the
    /// listing does not exist.
    async fn set_archived(&self, id: Uuid, archived: bool, history: &PropertyHistory) -> Result<bool>;
    /// Audit trail, newest first, with the author of each entry.
    async fn history(&self, id: Uuid) -> Result<Vec<HistoryEntryView>>;
}
