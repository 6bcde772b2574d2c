use serde::Serialize;
use shared::AddressQuery;

use crate::application::parse_id;
use crate::application::ports::{BuildingRepository, DistrictRepository};
use crate::application::views::BuildingView;
use crate::domain::District;
use crate::error::{AppError, Result};

/// Building attributes copied into a new listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFillData {
    pub year_built: Option<i32>,
    pub wall_material: Option<String>,
    pub layout: Option<String>,
    pub total_floors: Option<i32>,
    pub has_elevator: bool,
    pub heating_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AddressLookup {
    #[serde(rename_all = "camelCase")]
    Building {
        building: BuildingView,
        auto_fill_data: AutoFillData,
    },
    Buildings(Vec<BuildingView>),
    Districts { districts: Vec<District> },
}

/// District, street and number select one building; a district alone lists
/// its buildings; nothing lists the districts.
pub async fn execute<B, D>(buildings: &B, districts: &D, query: AddressQuery) -> Result<AddressLookup>
where
    B: BuildingRepository + ?Sized,
    D: DistrictRepository + ?Sized,
{
    let given = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let district = given(query.district_id);
    let street = given(query.street);
    let house_number = given(query.house_number);

    let Some(district) = district else {
        return Ok(AddressLookup::Districts {
            districts: districts.list_active().await?,
        });
    };
    let district_id = parse_id(&district, "District not found")?;

    match (street, house_number) {
        (Some(street), Some(house_number)) => {
            let view = buildings
                .active_at_address(district_id, &street, &house_number)
                .await?
                .ok_or_else(|| AppError::NotFound("Building not found".to_string()))?;
            let b = &view.building;
            let auto_fill_data = AutoFillData {
                year_built: b.year_built,
                wall_material: b.wall_material.clone(),
                layout: b.layout.clone(),
                total_floors: b.total_floors,
                has_elevator: b.has_elevator,
                heating_type: b.heating_type.clone(),
            };
            Ok(AddressLookup::Building {
                building: view,
                auto_fill_data,
            })
        }
        _ => Ok(AddressLookup::Buildings(buildings.in_district(district_id).await?)),
    }
}
