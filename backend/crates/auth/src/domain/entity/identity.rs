//! Identity
//!
//! The resolved caller of one request. Produced once by the authentication
//! middleware and handed to handlers explicitly; nothing about the caller is
//! kept anywhere else.

use uuid::Uuid;

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// How the identity was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// Signed session cookie referencing a server-side session
    Session { session_id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    /// Role as stored at resolution time
    pub role: UserRole,
    pub method: AuthMethod,
}

impl Identity {
    pub fn new(user_id: UserId, role: UserRole, method: AuthMethod) -> Self {
        Self {
            user_id,
            role,
            method,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        match self.method {
            AuthMethod::Session { session_id } => Some(session_id),
            AuthMethod::Bearer => None,
        }
    }
}
