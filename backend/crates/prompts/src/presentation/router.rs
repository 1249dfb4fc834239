//! Prompts Router

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::domain::repository::PromptStore;
use crate::infra::postgres::PgPromptRepository;
use crate::presentation::handlers::{self, PromptsAppState};

/// Create the Prompts router with PostgreSQL repository
pub fn prompts_router(state: PromptsAppState<PgPromptRepository>) -> Router {
    prompts_router_generic(state)
}

/// Create a generic Prompts router for any repository implementation.
///
/// Expects the auth crate's `resolve_identity` middleware in front of it.
pub fn prompts_router_generic<R: PromptStore>(state: PromptsAppState<R>) -> Router {
    Router::new()
        // Public
        .route(
            "/prompts",
            get(handlers::list_prompts::<R>).post(handlers::create_prompt::<R>),
        )
        .route("/prompts/stats", get(handlers::prompt_stats::<R>))
        .route(
            "/prompts/{id}",
            get(handlers::get_prompt::<R>).put(handlers::update_own_prompt::<R>),
        )
        .route("/prompts/{id}/like", post(handlers::toggle_like::<R>))
        .route("/prompts/{id}/favorite", post(handlers::toggle_favorite::<R>))
        .route("/languages", get(handlers::list_languages::<R>))
        // Current user
        .route("/user/prompts", get(handlers::my_prompts::<R>))
        .route("/user/likes", get(handlers::my_likes::<R>))
        .route("/user/favorites", get(handlers::my_favorites::<R>))
        // Admin
        .route("/admin/prompts", get(handlers::admin_list_prompts::<R>))
        .route(
            "/admin/prompts/{id}",
            put(handlers::admin_update_prompt::<R>).delete(handlers::delete_prompt::<R>),
        )
        .route(
            "/admin/prompts/{id}/status",
            put(handlers::update_prompt_status::<R>),
        )
        .route(
            "/admin/prompts/{id}/reviews",
            get(handlers::prompt_reviews::<R>),
        )
        .route("/admin/languages", post(handlers::create_language::<R>))
        .route("/admin/maintenance/recount", post(handlers::recount::<R>))
        .with_state(state)
}
