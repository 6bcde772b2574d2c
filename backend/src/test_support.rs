//! Fixtures shared by unit tests.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::domain::{DisplayName, Email, User, UserRole};

pub fn user(email: &str, role: UserRole) -> User {
    let name = email.split('@').next().unwrap_or("user").to_string();
    User::new(
        Email::new(email.to_string()).unwrap(),
        DisplayName::new(name).unwrap(),
        role,
    )
}

pub fn user_with_password(email: &str, role: UserRole, password: &str) -> User {
    let mut user = user(email, role);
    user.set_password_hash(bcrypt::hash(password, 4).unwrap());
    user
}

/// Fresh in-memory database with the schema applied.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
