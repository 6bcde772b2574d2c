use crate::application::ports::UserRepository;
use crate::application::Actor;
use crate::domain::UserId;
use crate::error::{AppError, Result};

/// Accounts are never removed, only switched off.
pub async fn execute<R: UserRepository + ?Sized>(users: &R, actor: &Actor, id: &UserId) -> Result<()> {
    if *id == actor.id {
        return Err(AppError::Validation("Cannot delete your own account".to_string()));
    }
    let mut user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    user.deactivate();
    users.update(&user).await?;
    tracing::info!(user_id = %id, by = %actor.id, "User deactivated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::MockUserRepository;
    use crate::domain::UserRole;
    use crate::test_support::user;

    #[tokio::test]
    async fn deactivates_other_user() {
        let actor = Actor {
            id: UserId::new(),
            role: UserRole::Admin,
        };
        let target = user("agent@example.com", UserRole::Agent);
        let id = *target.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(target.clone())));
        repo.expect_update().withf(|u| !u.is_active()).times(1).returning(|_| Ok(()));

        execute(&repo, &actor, &id).await.unwrap();
    }

    #[tokio::test]
    async fn refuses_self() {
        let actor = Actor {
            id: UserId::new(),
            role: UserRole::Admin,
        };
        let repo = MockUserRepository::new();
        assert!(matches!(
            execute(&repo, &actor, &actor.id).await,
            Err(AppError::Validation(_))
        ));
    }
}
