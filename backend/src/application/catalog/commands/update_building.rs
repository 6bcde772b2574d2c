use shared::UpdateBuildingRequest;
use uuid::Uuid;

use crate::application::parse_id;
use crate::application::ports::{BuildingRepository, DistrictRepository};
use crate::application::views::BuildingView;
use crate::error::{AppError, Result};

/// Absent or empty fields keep their value. Changing street or number
/// rebuilds the full address.
pub async fn execute<B, D>(buildings: &B, districts: &D, id: Uuid, request: UpdateBuildingRequest) -> Result<BuildingView>
where
    B: BuildingRepository + ?Sized,
    D: DistrictRepository + ?Sized,
{
    let mut building = buildings
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Building not found".to_string()))?;

    if let Some(raw) = request.district_id.filter(|d| !d.trim().is_empty()) {
        let district_id = parse_id(&raw, "District not found")?;
        if districts.find_by_id(district_id).await?.is_none() {
            return Err(AppError::NotFound("District not found".to_string()));
        }
        building.district_id = district_id;
    }

    if request.street.is_some() || request.house_number.is_some() {
        building.relocate(request.street.as_deref(), request.house_number.as_deref());
    }
    if let Some(year) = request.year_built {
        building.year_built = Some(year);
    }
    if let Some(material) = request.wall_material.filter(|v| !v.is_empty()) {
        building.wall_material = Some(material);
    }
    if let Some(floors) = request.total_floors {
        building.total_floors = Some(floors);
    }
    if let Some(layout) = request.layout.filter(|v| !v.is_empty()) {
        building.layout = Some(layout);
    }
    if let Some(elevator) = request.has_elevator {
        building.has_elevator = elevator;
    }
    building.updated_at = chrono::Utc::now();

    buildings.update(&building).await?;
    tracing::info!(building_id = %id, "Building updated");

    buildings
        .find_view(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Building not found".to_string()))
}
