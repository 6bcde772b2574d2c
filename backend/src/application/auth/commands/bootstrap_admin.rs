use shared::{SetupAdminRequest, UserProfile};

use crate::application::auth::password;
use crate::application::ports::UserRepository;
use crate::application::views::profile;
use crate::domain::{DisplayName, Email, User, UserRole};
use crate::error::{AppError, Result};

/// Creates the first administrator. Closed once an active admin exists.
pub async fn execute<R: UserRepository + ?Sized>(users: &R, request: SetupAdminRequest) -> Result<UserProfile> {
    let (Some(email), Some(name), Some(secret)) = (request.email, request.name, request.password) else {
        return Err(AppError::Validation("Email, name and password are required".to_string()));
    };
    if secret.is_empty() {
        return Err(AppError::Validation("Email, name and password are required".to_string()));
    }

    if users.count_active_admins().await? > 0 {
        return Err(AppError::Conflict("Setup has already been completed".to_string()));
    }

    let email = Email::new(email).map_err(AppError::Validation)?;
    let name = DisplayName::new(name).map_err(AppError::Validation)?;
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".to_string()));
    }

    let mut admin = User::new(email, name, UserRole::Admin);
    admin.set_password_hash(password::hash(&secret)?);
    users.insert(&admin).await?;

    tracing::info!(user_id = %admin.id(), "Initial administrator created");
    Ok(profile(&admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::MockUserRepository;

    fn request() -> SetupAdminRequest {
        SetupAdminRequest {
            email: Some("root@example.com".into()),
            name: Some("Root".into()),
            password: Some("pw".into()),
        }
    }

    #[tokio::test]
    async fn creates_admin_when_none_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_active_admins().returning(|| Ok(0));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user| user.role() == UserRole::Admin && user.can_sign_in())
            .times(1)
            .returning(|_| Ok(()));

        let profile = execute(&repo, request()).await.unwrap();
        assert_eq!(profile.role, "ADMIN");
        assert_eq!(profile.email, "root@example.com");
    }

    #[tokio::test]
    async fn closed_once_an_admin_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_active_admins().returning(|| Ok(1));
        repo.expect_insert().never();

        let err = execute(&repo, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_password_is_rejected() {
        let repo = MockUserRepository::new();
        let err = execute(
            &repo,
            SetupAdminRequest {
                password: None,
                ..request()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
