use shared::NamedEntityRequest;

use crate::application::ports::DistrictRepository;
use crate::domain::District;
use crate::error::{AppError, Result};

pub async fn list<R: DistrictRepository + ?Sized>(repo: &R) -> Result<Vec<District>> {
    repo.list_active().await
}

pub async fn create<R: DistrictRepository + ?Sized>(repo: &R, request: NamedEntityRequest) -> Result<District> {
    let district = District::new(request.name.unwrap_or_default(), request.description)
        .map_err(AppError::Validation)?;
    if repo.find_by_name(&district.name).await?.is_some() {
        return Err(AppError::Conflict("District with this name already exists".to_string()));
    }
    repo.insert(&district).await?;
    tracing::info!(district_id = %district.id, name = %district.name, "District created");
    Ok(district)
}
