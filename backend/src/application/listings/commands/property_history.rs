use crate::application::listings::PROPERTY_NOT_FOUND;
use crate::application::ports::PropertyRepository;
use crate::application::views::HistoryEntryView;
use crate::application::{parse_id, Actor};
use crate::error::{AppError, Result};

/// Agents only read the trail of listings they created or work.
pub async fn execute<P: PropertyRepository + ?Sized>(
    properties: &P,
    actor: &Actor,
    id: &str,
) -> Result<Vec<HistoryEntryView>> {
    actor.require_listing_access()?;
    let id = parse_id(id, PROPERTY_NOT_FOUND)?;
    let property = properties
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PROPERTY_NOT_FOUND.to_string()))?;

    if actor.is_agent() && !property.is_worked_by(&actor.id) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }
    properties.history(id).await
}
