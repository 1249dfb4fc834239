//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::application::ManageUsersUseCase;
use auth::middleware::resolve_identity;
use auth::presentation::AuthAppState;
use auth::{AuthConfig, PgAuthRepository, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use prompts::{PgPromptRepository, PromptsAppState, PromptsConfig, prompts_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,prompts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));
    if let Err(e) = auth_repo.cleanup_expired().await {
        tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
    }

    // Promote the configured account, if any
    if let Ok(email) = env::var("BOOTSTRAP_ADMIN_EMAIL") {
        let promoted = ManageUsersUseCase::new(auth_repo.clone())
            .bootstrap_admin(&email)
            .await?;
        if !promoted {
            tracing::warn!(email = %email, "Bootstrap admin account not found");
        }
    }

    // Auth configuration
    let auth_config = Arc::new(load_auth_config()?);
    let tokens = TokenService::from_config(&auth_config)?;
    let auth_state = AuthAppState::new(auth_repo, auth_config, tokens);

    // Prompts
    let prompts_state = PromptsAppState::new(
        Arc::new(PgPromptRepository::new(pool.clone())),
        Arc::new(PromptsConfig::default()),
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router. Every request is resolved to an identity once, before
    // any handler runs.
    let api = Router::new()
        .merge(auth_router(auth_state.clone()))
        .merge(prompts_router(prompts_state))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            resolve_identity::<PgAuthRepository>,
        ));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Secrets come from the environment in release builds. Debug builds fall
/// back to random secrets and insecure cookies.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::with_random_secret()
    };

    let token_secret = match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret) if !secret.is_empty() => secret.into_bytes(),
        _ if cfg!(debug_assertions) => base.token_secret.clone(),
        _ => anyhow::bail!("AUTH_TOKEN_SECRET must be set in production"),
    };

    let session_secret = match env::var("AUTH_SESSION_SECRET") {
        Ok(secret_b64) => {
            let bytes = Engine::decode(&general_purpose::STANDARD, secret_b64.trim())
                .context("AUTH_SESSION_SECRET must be base64")?;
            <[u8; 32]>::try_from(bytes.as_slice())
                .map_err(|_| anyhow::anyhow!("AUTH_SESSION_SECRET must decode to 32 bytes"))?
        }
        Err(_) if cfg!(debug_assertions) => base.session_secret,
        Err(_) => anyhow::bail!("AUTH_SESSION_SECRET must be set in production"),
    };

    Ok(AuthConfig {
        token_secret,
        session_secret,
        ..base
    })
}
