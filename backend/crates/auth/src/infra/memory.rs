//! In-memory repository for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryAuthRepository {
    users: Mutex<HashMap<UserId, User>>,
    sessions: Mutex<HashMap<Uuid, AuthSession>>,
}

impl InMemoryAuthRepository {
    fn users(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, User>> {
        self.users.lock().unwrap()
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, AuthSession>> {
        self.sessions.lock().unwrap()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users().get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.users().values().find(|u| &u.email == email).cloned())
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users().values().any(|u| &u.email == email))
    }

    async fn update_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users();
        if users
            .values()
            .any(|u| u.email == user.email && u.user_id != user.user_id)
        {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn list_users(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.users().values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions().insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        Ok(self.sessions().get(&session_id).cloned())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions().remove(&session_id);
        Ok(())
    }

    async fn delete_sessions_for_user(
        &self,
        user_id: &UserId,
        except: Option<Uuid>,
    ) -> AuthResult<u64> {
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|id, s| &s.user_id != user_id || Some(*id) == except);
        Ok((before - sessions.len()) as u64)
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
