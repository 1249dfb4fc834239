//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user.
    ///
    /// Fails with `AuthError::EmailTaken` when the unique email index
    /// rejects the row.
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;

    /// Persist profile, credential and role changes
    async fn update_user(&self, user: &User) -> AuthResult<()>;

    /// All users, newest first
    async fn list_users(&self) -> AuthResult<Vec<User>>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find a session regardless of expiry; callers decide what to do with
    /// expired rows.
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Drop every session of a user, e.g. after a password change
    async fn delete_sessions_for_user(&self, user_id: &UserId, except: Option<Uuid>) -> AuthResult<u64>;

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}
