//! Auth Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(state: AuthAppState<PgAuthRepository>) -> Router {
    auth_router_generic(state)
}

/// Create a generic Auth router for any repository implementation.
///
/// Expects the `resolve_identity` middleware to run in front of it.
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .route("/auth/logout", post(handlers::logout::<R>))
        .route("/auth/me", get(handlers::me::<R>))
        .route("/user/profile", get(handlers::me::<R>))
        .route("/user/settings", put(handlers::update_settings::<R>))
        .route("/user/avatar", delete(handlers::delete_avatar::<R>))
        .route("/admin/users", get(handlers::list_users::<R>))
        .route("/admin/users/{id}/role", put(handlers::change_role::<R>))
        .with_state(state)
}
