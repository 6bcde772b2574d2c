use shared::MessageResponse;

use crate::application::listings::PROPERTY_NOT_FOUND;
use crate::application::ports::PropertyRepository;
use crate::application::views::PropertyView;
use crate::application::{parse_id, Actor};
use crate::domain::{HistoryAction, PropertyHistory};
use crate::error::{AppError, Result};

fn not_found() -> AppError {
    AppError::NotFound(PROPERTY_NOT_FOUND.to_string())
}

/// Soft delete: the listing moves to the archive and the note keeps the
/// status it had.
pub async fn archive<P: PropertyRepository + ?Sized>(properties: &P, actor: &Actor, id: &str) -> Result<MessageResponse> {
    actor.require_staff()?;
    let id = parse_id(id, PROPERTY_NOT_FOUND)?;
    let property = properties.find(id).await?.ok_or_else(not_found)?;

    let note = format!("Объект перенесен в архив. Статус: {} → ARCHIVED", property.status);
    let history = PropertyHistory::record(id, actor.id, HistoryAction::Archived, Some(note));
    if !properties.set_archived(id, true, &history).await? {
        return Err(not_found());
    }
    tracing::info!(property_id = %id, by = %actor.id, "Property archived");
    Ok(MessageResponse::new("Property archived successfully"))
}

/// Archive or restore toggle used by the listing table.
pub async fn set_archived<P: PropertyRepository + ?Sized>(
    properties: &P,
    actor: &Actor,
    id: &str,
    archived: bool,
) -> Result<PropertyView> {
    actor.require_staff()?;
    let id = parse_id(id, PROPERTY_NOT_FOUND)?;
    let action = if archived { HistoryAction::Archived } else { HistoryAction::Restored };
    let history = PropertyHistory::record(id, actor.id, action, None);

    if !properties.set_archived(id, archived, &history).await? {
        return Err(not_found());
    }
    tracing::info!(property_id = %id, by = %actor.id, archived, "Archive flag changed");
    properties.find_view(id).await?.ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::property_repository::MockPropertyRepository;
    use crate::domain::{Property, PropertyStatus, UserId, UserRole};
    use uuid::Uuid;

    fn actor(role: UserRole) -> Actor {
        Actor { id: UserId::new(), role }
    }

    #[tokio::test]
    async fn archive_notes_previous_status() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_find().returning(|id| {
            let mut property = Property { id, ..Property::new(Uuid::new_v4(), UserId::new()) };
            property.status = PropertyStatus::Sold;
            Ok(Some(property))
        });
        properties
            .expect_set_archived()
            .withf(|_, archived, history| {
                *archived
                    && history.action == HistoryAction::Archived
                    && history.notes.as_deref() == Some("Объект перенесен в архив. Статус: SOLD → ARCHIVED")
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let response = archive(&properties, &actor(UserRole::Manager), &Uuid::new_v4().to_string())
            .await
            .unwrap();
        assert_eq!(response.message, "Property archived successfully");
    }

    #[tokio::test]
    async fn agents_cannot_archive() {
        let properties = MockPropertyRepository::new();
        let err = archive(&properties, &actor(UserRole::Agent), &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn restore_of_missing_listing_is_not_found() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_set_archived()
            .withf(|_, archived, history| !archived && history.action == HistoryAction::Restored && history.notes.is_none())
            .returning(|_, _, _| Ok(false));

        let err = set_archived(&properties, &actor(UserRole::Admin), &Uuid::new_v4().to_string(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
