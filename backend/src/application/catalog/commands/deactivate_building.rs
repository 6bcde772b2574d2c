use uuid::Uuid;

use crate::application::ports::BuildingRepository;
use crate::error::{AppError, Result};

pub async fn execute<R: BuildingRepository + ?Sized>(repo: &R, id: Uuid) -> Result<()> {
    if !repo.deactivate(id).await? {
        return Err(AppError::NotFound("Building not found".to_string()));
    }
    tracing::info!(building_id = %id, "Building deactivated");
    Ok(())
}
