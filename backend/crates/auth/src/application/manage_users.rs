//! User Management Use Case
//!
//! Admin-only listing and role changes, plus the startup promotion of a
//! configured bootstrap admin.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct ManageUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ManageUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_users().await
    }

    /// `role` must be one of the closed role codes
    pub async fn change_role(&self, user_id: &UserId, role: &str) -> AuthResult<User> {
        let role = UserRole::from_code(role)
            .ok_or_else(|| AuthError::Validation(format!("Invalid role: {role}")))?;

        let mut user = self
            .user_repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.user_role != role {
            user.set_role(role);
            self.user_repo.update_user(&user).await?;
            tracing::info!(user_id = %user.user_id, role = %role, "User role changed");
        }

        Ok(user)
    }

    /// Promote the account with `email` to ADMIN if it exists.
    ///
    /// Returns whether a promotion happened.
    pub async fn bootstrap_admin(&self, email: &str) -> AuthResult<bool> {
        let email = Email::new(email)?;
        let Some(mut user) = self.user_repo.find_user_by_email(&email).await? else {
            tracing::warn!(email = %email, "Bootstrap admin account not registered yet");
            return Ok(false);
        };

        if user.is_admin() {
            return Ok(false);
        }

        user.set_role(UserRole::Admin);
        self.user_repo.update_user(&user).await?;
        tracing::info!(user_id = %user.user_id, "Bootstrap admin promoted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::display_name::DisplayName;
    use crate::infra::memory::InMemoryAuthRepository;

    async fn setup() -> (ManageUsersUseCase<InMemoryAuthRepository>, User) {
        let repo = Arc::new(InMemoryAuthRepository::default());
        let user = User::new(
            Email::new("eve@example.com").unwrap(),
            DisplayName::new("Eve").unwrap(),
        );
        repo.create_user(&user).await.unwrap();
        (ManageUsersUseCase::new(repo), user)
    }

    #[tokio::test]
    async fn test_change_role() {
        let (use_case, user) = setup().await;
        let updated = use_case.change_role(&user.user_id, "ADMIN").await.unwrap();
        assert_eq!(updated.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_invalid_role_rejected() {
        let (use_case, user) = setup().await;
        for role in ["SUPERUSER", "admin", ""] {
            let err = use_case.change_role(&user.user_id, role).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (use_case, _) = setup().await;
        let err = use_case.change_role(&UserId::new(), "ADMIN").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_bootstrap_admin() {
        let (use_case, _) = setup().await;
        assert!(use_case.bootstrap_admin("EVE@example.com").await.unwrap());
        assert!(!use_case.bootstrap_admin("eve@example.com").await.unwrap());
        assert!(!use_case.bootstrap_admin("nobody@example.com").await.unwrap());
    }
}
