//! Sign Up Use Case
//!
//! Creates a new user account, then signs it in.

use std::sync::Arc;

use crate::application::check_session::sign_session_id;
use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input. Fields stay optional so that a missing field is reported
/// by name.
#[derive(Debug, Default)]
pub struct SignUpInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    /// Bearer token
    pub token: String,
    /// Signed session cookie value
    pub session_token: String,
    pub session_max_age_secs: u64,
}

/// Reject absent or blank fields
pub(crate) fn required(field: &str, value: Option<String>) -> AuthResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AuthError::Validation(format!("Missing required field: {field}"))),
    }
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = required("email", input.email)?;
        let name = required("name", input.name)?;
        let password = required("password", input.password)?;

        let email = Email::new(email)?;
        let display_name = DisplayName::new(name)?;
        let raw_password = RawPassword::new(password)?;

        if self.user_repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let mut user = User::new(email, display_name);
        user.set_password(&raw_password, self.config.pepper())?;

        // A concurrent registration can still lose the race at the unique index
        self.user_repo.create_user(&user).await?;

        let ttl = self.config.session_ttl(false);
        let session = AuthSession::new(
            user.user_id,
            false,
            chrono::Duration::from_std(ttl)
                .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?,
        );
        self.session_repo.create_session(&session).await?;

        let token = self.tokens.issue(&user.user_id)?;
        let session_token = sign_session_id(&self.config, session.session_id);

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(SignUpOutput {
            user,
            token,
            session_token,
            session_max_age_secs: ttl.as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use crate::infra::memory::InMemoryAuthRepository;

    fn use_case() -> (SignUpUseCase<InMemoryAuthRepository, InMemoryAuthRepository>, Arc<TokenService>) {
        let repo = Arc::new(InMemoryAuthRepository::default());
        let config = Arc::new(AuthConfig::development());
        let tokens = TokenService::from_config(&config).unwrap();
        (
            SignUpUseCase::new(repo.clone(), repo, tokens.clone(), config),
            tokens,
        )
    }

    fn input(email: &str) -> SignUpInput {
        SignUpInput {
            email: Some(email.to_string()),
            name: Some("Grace".to_string()),
            password: Some("CorrectHorse#42".to_string()),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_role() {
        let (use_case, tokens) = use_case();
        let out = use_case.execute(input("grace@example.com")).await.unwrap();

        assert_eq!(out.user.user_role, UserRole::User);
        assert_eq!(tokens.verify(&out.token), Some(out.user.user_id));
        assert!(!out.session_token.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (use_case, _) = use_case();
        use_case.execute(input("grace@example.com")).await.unwrap();

        let err = use_case.execute(input("GRACE@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_missing_field_is_named() {
        let (use_case, _) = use_case();
        let err = use_case
            .execute(SignUpInput {
                password: None,
                ..input("grace@example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Missing required field: password"));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let (use_case, _) = use_case();
        let err = use_case
            .execute(SignUpInput {
                password: Some("short".to_string()),
                ..input("grace@example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
