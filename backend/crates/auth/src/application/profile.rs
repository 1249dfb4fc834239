//! Profile Use Cases
//!
//! Read and change the caller's own account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct UpdateSettingsInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct ProfileUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> ProfileUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply the provided fields. Blank fields are ignored. A password
    /// change needs the current password and drops the user's other
    /// sessions.
    pub async fn update_settings(
        &self,
        user_id: &UserId,
        current_session: Option<uuid::Uuid>,
        input: UpdateSettingsInput,
    ) -> AuthResult<User> {
        let mut user = self.get(user_id).await?;

        if let Some(name) = non_blank(input.name) {
            user.set_display_name(DisplayName::new(name)?);
        }

        if let Some(email) = non_blank(input.email) {
            let email = Email::new(email)?;
            if email != user.email {
                if self.user_repo.email_exists(&email).await? {
                    return Err(AuthError::EmailTaken);
                }
                user.set_email(email);
            }
        }

        let password_changed = match non_blank(input.new_password) {
            Some(new_password) => {
                let current = non_blank(input.current_password).ok_or_else(|| {
                    AuthError::Validation("Current password is required".to_string())
                })?;
                if !user.check_password(&RawPassword::presented(current), self.config.pepper()) {
                    return Err(AuthError::Validation(
                        "Current password is incorrect".to_string(),
                    ));
                }
                user.set_password(&RawPassword::new(new_password)?, self.config.pepper())?;
                true
            }
            None => false,
        };

        self.user_repo.update_user(&user).await?;

        if password_changed {
            let dropped = self
                .session_repo
                .delete_sessions_for_user(&user.user_id, current_session)
                .await?;
            tracing::info!(user_id = %user.user_id, dropped, "Password changed");
        }

        Ok(user)
    }

    pub async fn clear_avatar(&self, user_id: &UserId) -> AuthResult<User> {
        let mut user = self.get(user_id).await?;
        if user.clear_avatar() {
            self.user_repo.update_user(&user).await?;
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::auth_session::AuthSession;
    use crate::infra::memory::InMemoryAuthRepository;

    async fn setup() -> (
        Arc<InMemoryAuthRepository>,
        ProfileUseCase<InMemoryAuthRepository, InMemoryAuthRepository>,
        User,
    ) {
        let repo = Arc::new(InMemoryAuthRepository::default());
        let config = Arc::new(AuthConfig::development());

        let mut user = User::new(
            Email::new("ann@example.com").unwrap(),
            DisplayName::new("Ann").unwrap(),
        );
        user.set_password(&RawPassword::new("OldSecret#11".to_string()).unwrap(), None)
            .unwrap();
        repo.create_user(&user).await.unwrap();

        let other = User::new(
            Email::new("bob@example.com").unwrap(),
            DisplayName::new("Bob").unwrap(),
        );
        repo.create_user(&other).await.unwrap();

        (repo.clone(), ProfileUseCase::new(repo.clone(), repo, config), user)
    }

    #[tokio::test]
    async fn test_update_name() {
        let (_, use_case, user) = setup().await;
        let updated = use_case
            .update_settings(
                &user.user_id,
                None,
                UpdateSettingsInput {
                    name: Some("Annie".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name.as_str(), "Annie");
    }

    #[tokio::test]
    async fn test_email_taken() {
        let (_, use_case, user) = setup().await;
        let err = use_case
            .update_settings(
                &user.user_id,
                None,
                UpdateSettingsInput {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_same_email_is_not_a_conflict() {
        let (_, use_case, user) = setup().await;
        assert!(use_case
            .update_settings(
                &user.user_id,
                None,
                UpdateSettingsInput {
                    email: Some("ANN@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_wrong_current_password() {
        let (_, use_case, user) = setup().await;
        let err = use_case
            .update_settings(
                &user.user_id,
                None,
                UpdateSettingsInput {
                    current_password: Some("Wrong#Secret1".to_string()),
                    new_password: Some("NewSecret#22".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_password_change_drops_other_sessions() {
        let (repo, use_case, user) = setup().await;
        let keep = AuthSession::new(user.user_id, false, chrono::Duration::hours(1));
        let drop = AuthSession::new(user.user_id, false, chrono::Duration::hours(1));
        repo.create_session(&keep).await.unwrap();
        repo.create_session(&drop).await.unwrap();

        let updated = use_case
            .update_settings(
                &user.user_id,
                Some(keep.session_id),
                UpdateSettingsInput {
                    current_password: Some("OldSecret#11".to_string()),
                    new_password: Some("NewSecret#22".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.check_password(&RawPassword::presented("NewSecret#22".into()), None));
        assert!(repo.find_session(keep.session_id).await.unwrap().is_some());
        assert!(repo.find_session(drop.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (_, use_case, _) = setup().await;
        let err = use_case.get(&UserId::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
