use std::str::FromStr;

use shared::UpdateUserRequest;

use crate::application::auth::password;
use crate::application::ports::UserRepository;
use crate::application::views::UserSummary;
use crate::application::Actor;
use crate::domain::{DisplayName, UserId, UserRole};
use crate::error::{AppError, Result};

/// Empty strings leave the field as it is.
pub async fn execute<R: UserRepository + ?Sized>(
    users: &R,
    actor: &Actor,
    id: &UserId,
    request: UpdateUserRequest,
) -> Result<UserSummary> {
    if *id == actor.id && request.is_active == Some(false) {
        return Err(AppError::Validation("Cannot deactivate your own account".to_string()));
    }

    let mut user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = request.name.filter(|n| !n.trim().is_empty()) {
        user.rename(DisplayName::new(name).map_err(AppError::Validation)?);
    }
    if let Some(role) = request.role.filter(|r| !r.trim().is_empty()) {
        user.change_role(UserRole::from_str(&role).map_err(AppError::Validation)?);
    }
    match request.is_active {
        Some(true) => user.activate(),
        Some(false) => user.deactivate(),
        None => {}
    }
    if let Some(secret) = request.password.filter(|p| !p.is_empty()) {
        user.set_password_hash(password::hash(&secret)?);
    }

    users.update(&user).await?;
    tracing::info!(user_id = %id, by = %actor.id, "User updated");
    Ok(UserSummary::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::MockUserRepository;
    use crate::test_support::user;

    fn admin() -> Actor {
        Actor {
            id: UserId::new(),
            role: UserRole::Admin,
        }
    }

    #[tokio::test]
    async fn cannot_deactivate_self() {
        let actor = admin();
        let repo = MockUserRepository::new();
        let req = UpdateUserRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let err = execute(&repo, &actor, &actor.id, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn applies_only_given_fields() {
        let target = user("agent@example.com", UserRole::Agent);
        let id = *target.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(target.clone())));
        repo.expect_update()
            .withf(|u| {
                u.role() == UserRole::Manager && u.display_name().as_str() == "agent" && !u.is_active()
            })
            .times(1)
            .returning(|_| Ok(()));

        let req = UpdateUserRequest {
            name: Some(String::new()),
            role: Some("MANAGER".into()),
            is_active: Some(false),
            password: None,
        };
        let summary = execute(&repo, &admin(), &id, req).await.unwrap();
        assert_eq!(summary.role, UserRole::Manager);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let err = execute(&repo, &admin(), &UserId::new(), UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
