//! Token Service
//!
//! Issues and verifies the signed bearer tokens handed out at register and
//! login. A token carries the subject user id, an issue time and an expiry;
//! it is HS256-signed with the server secret.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.token_secret.is_empty() {
            return Err(AuthError::Internal("token secret is empty".to_string()));
        }
        let ttl = chrono::Duration::from_std(config.token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(&config.token_secret),
            decoding: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &Arc<AuthConfig>) -> AuthResult<Arc<Self>> {
        Self::new(config).map(Arc::new)
    }

    pub fn issue(&self, user_id: &UserId) -> AuthResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it were created at `issued_at`
    pub fn issue_at(&self, user_id: &UserId, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.into_uuid(),
            iat: issued_at.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Subject of a valid, unexpired token. Any defect yields `None`.
    pub fn verify(&self, token: &str) -> Option<UserId> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(UserId::from_uuid(data.claims.sub)),
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::with_random_secret()).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();
        let user_id = UserId::new();
        let token = tokens.issue(&user_id).unwrap();
        assert_eq!(tokens.verify(&token), Some(user_id));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let user_id = UserId::new();
        let token = tokens
            .issue_at(&user_id, Utc::now() - chrono::Duration::days(2))
            .unwrap();
        assert_eq!(tokens.verify(&token), None);
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = service().issue(&UserId::new()).unwrap();
        assert_eq!(service().verify(&token), None);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let tokens = service();
        let mut token = tokens.issue(&UserId::new()).unwrap();
        token.push('x');
        assert_eq!(tokens.verify(&token), None);
        assert_eq!(tokens.verify("not-a-token"), None);
        assert_eq!(tokens.verify(""), None);
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(TokenService::new(&AuthConfig::default()).is_err());
    }
}
