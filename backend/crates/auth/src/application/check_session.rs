//! Check Session Use Case
//!
//! Verifies a signed session cookie and loads the server-side session.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Sign a session id for the cookie value
pub fn sign_session_id(config: &AuthConfig, session_id: Uuid) -> String {
    platform::crypto::sign_value(&config.session_secret, &session_id.to_string())
}

/// Session id carried by a correctly signed cookie value
pub fn parse_session_token(config: &AuthConfig, token: &str) -> Option<Uuid> {
    platform::crypto::verify_signed_value(&config.session_secret, token)?
        .parse()
        .ok()
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Live session for the cookie value, or `None` when the signature is
    /// wrong, the session is unknown, or it has expired. Expired rows are
    /// removed on sight.
    pub async fn execute(&self, session_token: &str) -> AuthResult<Option<AuthSession>> {
        let Some(session_id) = parse_session_token(&self.config, session_token) else {
            tracing::debug!("Session cookie signature mismatch");
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_session(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::AuthSessionRepository;
    use crate::domain::value_object::user_id::UserId;
    use crate::infra::memory::InMemoryAuthRepository;

    fn setup() -> (Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryAuthRepository::default()),
            Arc::new(AuthConfig::development()),
        )
    }

    #[test]
    fn test_sign_and_parse() {
        let config = AuthConfig::development();
        let id = Uuid::new_v4();
        let token = sign_session_id(&config, id);
        assert_eq!(parse_session_token(&config, &token), Some(id));

        let other = AuthConfig::development();
        assert_eq!(parse_session_token(&other, &token), None);
        assert_eq!(parse_session_token(&config, "garbage"), None);
    }

    #[tokio::test]
    async fn test_live_session_found() {
        let (repo, config) = setup();
        let session = AuthSession::new(UserId::new(), false, chrono::Duration::hours(1));
        repo.create_session(&session).await.unwrap();

        let use_case = CheckSessionUseCase::new(repo, config.clone());
        let token = sign_session_id(&config, session.session_id);
        let found = use_case.execute(&token).await.unwrap().unwrap();
        assert_eq!(found.session_id, session.session_id);
    }

    #[tokio::test]
    async fn test_expired_session_removed() {
        let (repo, config) = setup();
        let session = AuthSession::new(UserId::new(), false, chrono::Duration::zero());
        repo.create_session(&session).await.unwrap();

        let use_case = CheckSessionUseCase::new(repo.clone(), config.clone());
        let token = sign_session_id(&config, session.session_id);
        assert!(use_case.execute(&token).await.unwrap().is_none());
        assert!(repo.find_session(session.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forged_cookie_ignored() {
        let (repo, config) = setup();
        let use_case = CheckSessionUseCase::new(repo, config);
        let forged = format!("{}.AAAA", Uuid::new_v4());
        assert!(use_case.execute(&forged).await.unwrap().is_none());
    }
}
