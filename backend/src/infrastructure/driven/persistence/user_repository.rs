use axum::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::db_types::DbUser;
use crate::application::ports::UserRepository;
use crate::application::views::{PropertyCounts, UserSummary};
use crate::domain::{Email, User, UserId, UserRole};
use crate::error::Result;

const USER_COLUMNS: &str =
    "u.id, u.email, u.name, u.role, u.password_hash, u.is_active, u.created_at, u.last_login_at";

#[derive(FromRow)]
struct DbUserWithCounts {
    #[sqlx(flatten)]
    user: DbUser,
    created_properties: i64,
    assigned_properties: i64,
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let row: Option<DbUser> = sqlx::query_as(&format!("SELECT {} FROM users u WHERE u.id = ?", USER_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>> {
        let row: Option<DbUser> = sqlx::query_as(&format!("SELECT {} FROM users u WHERE u.email = ?", USER_COLUMNS))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, name, role, password_hash, is_active, created_at, last_login_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id().to_string())
        .bind(user.email().as_str())
        .bind(user.display_name().as_str())
        .bind(user.role().as_db_str())
        .bind(user.password_hash())
        .bind(user.is_active())
        .bind(user.created_at())
        .bind(user.last_login_at())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query("UPDATE users SET name = ?, role = ?, password_hash = ?, is_active = ? WHERE id = ?")
            .bind(user.display_name().as_str())
            .bind(user.role().as_db_str())
            .bind(user.password_hash())
            .bind(user.is_active())
            .bind(user.id().to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self, role: Option<UserRole>) -> Result<Vec<UserSummary>> {
        let mut sql = format!(
            "SELECT {},
                (SELECT COUNT(*) FROM properties p WHERE p.created_by_id = u.id) AS created_properties,
                (SELECT COUNT(*) FROM properties p WHERE p.assigned_to_id = u.id) AS assigned_properties
             FROM users u",
            USER_COLUMNS
        );
        if role.is_some() {
            sql.push_str(" WHERE u.role = ?");
        }
        sql.push_str(" ORDER BY u.created_at DESC, u.rowid DESC");

        let mut query = sqlx::query_as::<_, DbUserWithCounts>(&sql);
        if let Some(role) = role {
            query = query.bind(role.as_db_str());
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| -> Result<UserSummary> {
                let counts = PropertyCounts {
                    created_properties: row.created_properties,
                    assigned_properties: row.assigned_properties,
                };
                let user = User::try_from(row.user)?;
                Ok(UserSummary {
                    counts: Some(counts),
                    ..UserSummary::from(&user)
                })
            })
            .collect()
    }

    async fn count_active_admins(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'ADMIN' AND is_active = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::{memory_pool, user};

    #[tokio::test]
    async fn insert_then_find_by_email() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let agent = user("agent@example.com", UserRole::Agent);
        repo.insert(&agent).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("AGENT@example.com".into()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), agent.id());
        assert_eq!(found.role(), UserRole::Agent);
        assert!(found.is_active());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        repo.insert(&user("a@example.com", UserRole::Agent)).await.unwrap();
        let err = repo.insert(&user("a@example.com", UserRole::Manager)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_filters_by_role_with_counts() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        repo.insert(&user("a@example.com", UserRole::Agent)).await.unwrap();
        repo.insert(&user("m@example.com", UserRole::Manager)).await.unwrap();

        let agents = repo.list(Some(UserRole::Agent)).await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].email, "a@example.com");
        assert_eq!(agents[0].counts, Some(PropertyCounts::default()));
        assert_eq!(repo.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn counts_only_active_admins() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let mut admin = user("root@example.com", UserRole::Admin);
        repo.insert(&admin).await.unwrap();
        assert_eq!(repo.count_active_admins().await.unwrap(), 1);

        admin.deactivate();
        repo.update(&admin).await.unwrap();
        assert_eq!(repo.count_active_admins().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn records_last_login() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let agent = user("a@example.com", UserRole::Agent);
        repo.insert(&agent).await.unwrap();
        repo.record_login(agent.id(), Utc::now()).await.unwrap();
        let found = repo.find_by_id(agent.id()).await.unwrap().unwrap();
        assert!(found.last_login_at().is_some());
    }
}
