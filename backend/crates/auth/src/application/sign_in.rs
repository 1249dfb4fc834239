//! Sign In Use Case
//!
//! Authenticates a user by email and password and creates a session.

use std::sync::Arc;

use crate::application::check_session::sign_session_id;
use crate::application::config::AuthConfig;
use crate::application::sign_up::required;
use crate::application::token::TokenService;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Debug, Default)]
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Remember me flag
    pub remember_me: bool,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    /// Bearer token
    pub token: String,
    /// Signed session cookie value
    pub session_token: String,
    pub session_max_age_secs: u64,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = required("email", input.email)?;
        let password = required("password", input.password)?;

        // Unknown account and wrong password are indistinguishable
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::presented(password);
        if !user.check_password(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = self.config.session_ttl(input.remember_me);
        let session = AuthSession::new(
            user.user_id,
            input.remember_me,
            chrono::Duration::from_std(ttl)
                .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?,
        );
        self.session_repo.create_session(&session).await?;

        let token = self.tokens.issue(&user.user_id)?;
        let session_token = sign_session_id(&self.config, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            token,
            session_token,
            session_max_age_secs: ttl.as_secs(),
        })
    }
}
