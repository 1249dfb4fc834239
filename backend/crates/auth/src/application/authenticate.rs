//! Authenticate Use Case
//!
//! Resolves the caller of a request from its `Authorization` header or, when
//! no header is sent, its session cookie.

use std::sync::Arc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::identity::{AuthMethod, Identity};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Token part of an `Authorization` value, if it is well-formed
/// `Bearer <token>` (scheme case-insensitive).
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

pub struct AuthenticateUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    sessions: CheckSessionUseCase<S>,
    tokens: Arc<TokenService>,
}

impl<U, S> AuthenticateUseCase<U, S>
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
            sessions: CheckSessionUseCase::new(session_repo, config),
            tokens,
        }
    }

    /// A present `Authorization` header decides the outcome on its own; the
    /// cookie is only consulted when the header is absent.
    ///
    /// The role is always read from the stored user, so a role change takes
    /// effect on the next request.
    pub async fn execute(
        &self,
        authorization: Option<&str>,
        session_cookie: Option<&str>,
    ) -> AuthResult<Identity> {
        if let Some(header) = authorization {
            let token = parse_bearer(header).ok_or(AuthError::InvalidToken)?;
            let user_id = self.tokens.verify(token).ok_or(AuthError::InvalidToken)?;
            let user = self
                .user_repo
                .find_user_by_id(&user_id)
                .await?
                .ok_or(AuthError::InvalidToken)?;

            return Ok(Identity::new(user.user_id, user.user_role, AuthMethod::Bearer));
        }

        if let Some(cookie) = session_cookie {
            if let Some(session) = self.sessions.execute(cookie).await? {
                if let Some(user) = self.user_repo.find_user_by_id(&session.user_id).await? {
                    return Ok(Identity::new(
                        user.user_id,
                        user.user_role,
                        AuthMethod::Session {
                            session_id: session.session_id,
                        },
                    ));
                }
                tracing::warn!(session_id = %session.session_id, "Session references missing user");
            }
        }

        Err(AuthError::AuthenticationRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::check_session::sign_session_id;
    use crate::domain::entity::{auth_session::AuthSession, user::User};
    use crate::domain::value_object::{
        display_name::DisplayName, email::Email, user_id::UserId, user_role::UserRole,
    };
    use crate::infra::memory::InMemoryAuthRepository;

    struct Fixture {
        repo: Arc<InMemoryAuthRepository>,
        config: Arc<AuthConfig>,
        tokens: Arc<TokenService>,
        use_case: AuthenticateUseCase<InMemoryAuthRepository, InMemoryAuthRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryAuthRepository::default());
        let config = Arc::new(AuthConfig::development());
        let tokens = TokenService::from_config(&config).unwrap();
        let use_case =
            AuthenticateUseCase::new(repo.clone(), repo.clone(), tokens.clone(), config.clone());
        Fixture {
            repo,
            config,
            tokens,
            use_case,
        }
    }

    async fn add_user(repo: &InMemoryAuthRepository, role: UserRole) -> User {
        let mut user = User::new(
            Email::new(format!("{}@example.com", UserId::new())).unwrap(),
            DisplayName::new("Someone").unwrap(),
        );
        user.set_role(role);
        repo.create_user(&user).await.unwrap();
        user
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("abc"), None);
    }

    #[tokio::test]
    async fn test_bearer_resolves_identity_with_stored_role() {
        let f = fixture();
        let user = add_user(&f.repo, UserRole::Admin).await;
        let header = format!("Bearer {}", f.tokens.issue(&user.user_id).unwrap());

        let identity = f.use_case.execute(Some(&header), None).await.unwrap();
        assert_eq!(identity.user_id, user.user_id);
        assert_eq!(identity.role, UserRole::Admin);
        assert_eq!(identity.method, AuthMethod::Bearer);
    }

    #[tokio::test]
    async fn test_malformed_header_is_invalid_token() {
        let f = fixture();
        for header in ["Token abc", "Bearer", "garbage", "Bearer not.a.jwt"] {
            let err = f.use_case.execute(Some(header), None).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidToken), "{header}");
        }
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_is_invalid() {
        let f = fixture();
        let header = format!("Bearer {}", f.tokens.issue(&UserId::new()).unwrap());
        let err = f.use_case.execute(Some(&header), None).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_header_wins_over_valid_cookie() {
        let f = fixture();
        let user = add_user(&f.repo, UserRole::User).await;
        let session = AuthSession::new(user.user_id, false, chrono::Duration::hours(1));
        f.repo.create_session(&session).await.unwrap();
        let cookie = sign_session_id(&f.config, session.session_id);

        let err = f
            .use_case
            .execute(Some("Bearer broken"), Some(&cookie))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));

        let identity = f.use_case.execute(None, Some(&cookie)).await.unwrap();
        assert_eq!(identity.session_id(), Some(session.session_id));
    }

    #[tokio::test]
    async fn test_nothing_presented_requires_authentication() {
        let f = fixture();
        let err = f.use_case.execute(None, None).await.unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationRequired));

        let err = f.use_case.execute(None, Some("forged.cookie")).await.unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationRequired));
    }
}
