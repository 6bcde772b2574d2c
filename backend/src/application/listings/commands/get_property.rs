use crate::application::listings::PROPERTY_NOT_FOUND;
use crate::application::ports::PropertyRepository;
use crate::application::views::PropertyView;
use crate::application::{parse_id, Actor};
use crate::error::{AppError, Result};

/// Full listing card with photos and the audit trail.
pub async fn execute<P: PropertyRepository + ?Sized>(properties: &P, actor: &Actor, id: &str) -> Result<PropertyView> {
    actor.require_listing_access()?;
    let id = parse_id(id, PROPERTY_NOT_FOUND)?;

    let mut view = properties
        .find_view(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PROPERTY_NOT_FOUND.to_string()))?;
    view.histories = Some(properties.history(id).await?);
    if actor.is_agent() {
        view.call_assignments = Some(Vec::new());
    }
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::property_repository::MockPropertyRepository;
    use crate::domain::{Property, UserId, UserRole};
    use uuid::Uuid;

    fn actor(role: UserRole) -> Actor {
        Actor { id: UserId::new(), role }
    }

    fn stored() -> MockPropertyRepository {
        let mut properties = MockPropertyRepository::new();
        properties.expect_find_view().returning(|id| {
            Ok(Some(PropertyView {
                property: Property { id, ..Property::new(Uuid::new_v4(), UserId::new()) },
                category: None,
                district: None,
                building: None,
                created_by: None,
                assigned_to: None,
                photos: vec![],
                call_assignments: None,
                histories: None,
            }))
        });
        properties.expect_history().returning(|_| Ok(vec![]));
        properties
    }

    #[tokio::test]
    async fn plain_user_is_forbidden_before_lookup() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_find_view().never();
        let err = execute(&properties, &actor(UserRole::User), "missing").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn agent_gets_empty_call_assignments() {
        let view = execute(&stored(), &actor(UserRole::Agent), &Uuid::new_v4().to_string())
            .await
            .unwrap();
        assert_eq!(view.call_assignments, Some(vec![]));
        assert_eq!(view.histories, Some(vec![]));
    }

    #[tokio::test]
    async fn manager_sees_history_without_assignments() {
        let view = execute(&stored(), &actor(UserRole::Manager), &Uuid::new_v4().to_string())
            .await
            .unwrap();
        assert!(view.call_assignments.is_none());
        assert!(view.histories.is_some());
    }

    #[tokio::test]
    async fn missing_listing_is_not_found() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_find_view().returning(|_| Ok(None));
        let err = execute(&properties, &actor(UserRole::Admin), &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
