use chrono::{DateTime, Utc};

use crate::domain::value_objects::*;

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    display_name: DisplayName,
    role: UserRole,
    password_hash: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: Email, display_name: DisplayName, role: UserRole) -> Self {
        Self {
            id: UserId::new(),
            email,
            display_name,
            role,
            password_hash: None,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: UserId,
        email: Email,
        display_name: DisplayName,
        role: UserRole,
        password_hash: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            role,
            password_hash,
            is_active,
            created_at,
            last_login_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Only active accounts with a password can sign in.
    pub fn can_sign_in(&self) -> bool {
        self.is_active && self.password_hash.is_some()
    }

    pub fn rename(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
    }

    pub fn change_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
