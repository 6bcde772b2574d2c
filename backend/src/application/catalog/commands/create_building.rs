use std::str::FromStr;

use shared::CreateBuildingRequest;

use crate::application::parse_id;
use crate::application::ports::{BuildingRepository, DistrictRepository};
use crate::application::views::BuildingView;
use crate::domain::{Building, ConfidenceLevel};
use crate::error::{AppError, Result};

pub async fn execute<B, D>(buildings: &B, districts: &D, request: CreateBuildingRequest) -> Result<BuildingView>
where
    B: BuildingRepository + ?Sized,
    D: DistrictRepository + ?Sized,
{
    let required = || AppError::Validation("District, street, and house number are required".to_string());
    let district_id = request.district_id.filter(|d| !d.trim().is_empty()).ok_or_else(required)?;
    let street = request.street.unwrap_or_default();
    let house_number = request.house_number.unwrap_or_default();

    let mut building = Building::new(parse_id(&district_id, "District not found")?, &street, &house_number)
        .map_err(AppError::Validation)?;

    let district = districts
        .find_by_id(building.district_id)
        .await?
        .ok_or_else(|| AppError::NotFound("District not found".to_string()))?;

    if buildings
        .find_by_address(building.district_id, &building.street, &building.house_number)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Building with this address already exists".to_string()));
    }

    building.year_built = request.year_built;
    building.wall_material = request.wall_material.filter(|v| !v.is_empty());
    building.total_floors = request.total_floors;
    building.layout = request.layout.filter(|v| !v.is_empty());
    building.has_elevator = request.has_elevator.unwrap_or(false);
    building.entrance_count = request.entrance_count;
    building.building_type = request.building_type.filter(|v| !v.is_empty());
    building.heating_type = request.heating_type.filter(|v| !v.is_empty());
    building.has_garbage_chute = request.has_garbage_chute.unwrap_or(false);
    building.latitude = request.latitude;
    building.longitude = request.longitude;
    if let Some(source) = request.data_source.filter(|v| !v.is_empty()) {
        building.data_source = Some(source);
    }
    if let Some(level) = request.confidence_level.filter(|v| !v.is_empty()) {
        building.confidence_level = ConfidenceLevel::from_str(&level).map_err(AppError::Validation)?;
    }

    buildings.insert(&building).await?;
    tracing::info!(building_id = %building.id, address = %building.full_address, "Building created");

    Ok(BuildingView {
        building,
        district: Some(district),
    })
}
