//! Auth Session Entity
//!
//! Server-side session created by an interactive sign-in. The cookie only
//! carries a signed reference to `session_id`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, remember_me: bool, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let session = AuthSession::new(UserId::new(), false, Duration::hours(1));
        assert!(!session.is_expired());
        assert!(session.is_expired_at(Utc::now() + Duration::hours(2)));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = AuthSession::new(UserId::new(), false, Duration::zero());
        assert!(session.is_expired());
    }
}
