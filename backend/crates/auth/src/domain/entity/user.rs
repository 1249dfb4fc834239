//! User Entity
//!
//! Account identity plus the credential store: the password hash lives on
//! the user and is only reachable through [`User::set_password`] and
//! [`User::check_password`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use kernel::error::app_error::AppResult;

/// User entity
///
/// Deliberately not `Serialize`; the presentation layer builds its own
/// response type that never includes the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lowercased
    pub email: Email,
    pub display_name: DisplayName,
    /// Public URL of an uploaded avatar
    pub avatar: Option<String>,
    password: Option<UserPassword>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with role `USER` and no password yet
    pub fn new(email: Email, display_name: DisplayName) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            display_name,
            avatar: None,
            password: None,
            user_role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate from storage
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        user_id: UserId,
        email: Email,
        display_name: DisplayName,
        avatar: Option<String>,
        password: Option<UserPassword>,
        user_role: UserRole,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            email,
            display_name,
            avatar,
            password,
            user_role,
            created_at,
            updated_at,
        }
    }

    /// Hash and store a new password (salted, one-way)
    pub fn set_password(&mut self, raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<()> {
        self.password = Some(UserPassword::from_raw(raw, pepper)?);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True iff `raw` matches the last password set.
    ///
    /// A user without a stored hash simply fails the check.
    pub fn check_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password
            .as_ref()
            .is_some_and(|hash| hash.verify(raw, pepper))
    }

    pub fn password_hash(&self) -> Option<&UserPassword> {
        self.password.as_ref()
    }

    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.email.fallback_avatar_url(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Returns whether an avatar was set
    pub fn clear_avatar(&mut self) -> bool {
        let had_avatar = self.avatar.take().is_some();
        if had_avatar {
            self.updated_at = Utc::now();
        }
        had_avatar
    }
}
