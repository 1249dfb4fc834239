//! Authorization Guard

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Pass the identity through when it holds at least `required`.
///
/// Call this before the guarded operation touches any state.
pub fn require_role(identity: Option<&Identity>, required: UserRole) -> AuthResult<&Identity> {
    match identity {
        Some(identity) if identity.role.satisfies(required) => Ok(identity),
        Some(identity) => {
            tracing::info!(
                user_id = %identity.user_id,
                role = %identity.role,
                required = %required,
                "Insufficient role"
            );
            Err(AuthError::Forbidden)
        }
        None => Err(AuthError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::AuthMethod;
    use crate::domain::value_object::user_id::UserId;

    fn identity(role: UserRole) -> Identity {
        Identity::new(UserId::new(), role, AuthMethod::Bearer)
    }

    #[test]
    fn test_admin_passes_both() {
        let admin = identity(UserRole::Admin);
        assert!(require_role(Some(&admin), UserRole::Admin).is_ok());
        assert!(require_role(Some(&admin), UserRole::User).is_ok());
    }

    #[test]
    fn test_user_denied_admin() {
        let user = identity(UserRole::User);
        assert!(require_role(Some(&user), UserRole::User).is_ok());
        assert!(matches!(
            require_role(Some(&user), UserRole::Admin),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_missing_identity_forbidden() {
        assert!(matches!(
            require_role(None, UserRole::User),
            Err(AuthError::Forbidden)
        ));
    }
}
