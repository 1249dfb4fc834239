//! Auth Middleware
//!
//! Resolves the caller once per request and stores the outcome in the
//! request extensions. Handlers read it back through the [`CurrentUser`],
//! [`AdminUser`] and [`MaybeUser`] extractors.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::{AuthenticateUseCase, require_role};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Outcome of resolving the request's credentials
#[derive(Debug, Clone)]
pub enum Authentication {
    Authenticated(Identity),
    /// No credentials were presented
    Anonymous,
    /// Credentials were presented but rejected
    InvalidToken,
}

impl Authentication {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Authentication::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Middleware resolving the `Authorization` header or session cookie into an
/// [`Authentication`] extension. It never rejects; the extractors decide.
pub async fn resolve_identity<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let headers = req.headers();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default().to_string());
    let cookie = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let authentication = match use_case
        .execute(authorization.as_deref(), cookie.as_deref())
        .await
    {
        Ok(identity) => Authentication::Authenticated(identity),
        Err(AuthError::AuthenticationRequired) => Authentication::Anonymous,
        Err(AuthError::InvalidToken) => Authentication::InvalidToken,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(authentication);
    next.run(req).await
}

fn authentication(parts: &Parts) -> Result<&Authentication, AuthError> {
    parts
        .extensions
        .get::<Authentication>()
        .ok_or_else(|| AuthError::Internal("identity middleware not installed".to_string()))
}

/// Caller with a valid identity
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match authentication(parts)? {
            Authentication::Authenticated(identity) => Ok(CurrentUser(identity.clone())),
            Authentication::Anonymous => Err(AuthError::AuthenticationRequired),
            Authentication::InvalidToken => Err(AuthError::InvalidToken),
        }
    }
}

/// Caller with a valid identity and the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        require_role(Some(&identity), UserRole::Admin)?;
        Ok(AdminUser(identity))
    }
}

/// Optional caller. Rejected credentials count as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(authentication(parts)?.identity().cloned()))
    }
}
