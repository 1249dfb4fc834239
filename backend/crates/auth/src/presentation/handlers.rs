//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::Json;
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    ManageUsersUseCase, ProfileUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase, TokenService, UpdateSettingsInput,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, ChangeRoleRequest, LoginRequest, MessageResponse, RegisterRequest,
    UpdateSettingsRequest, UserEnvelope, UserResponse, UsersResponse,
};
use crate::presentation::middleware::{AdminUser, CurrentUser};

/// Shared state for auth handlers and the identity middleware
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    let cookie = set_cookie_header(
        &state.config.session_cookie().with_max_age(output.session_max_age_secs),
        &output.session_token,
    );

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Registration successful",
            token: output.token,
            user: UserResponse::from(&output.user),
        }),
    ))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
            remember_me: req.remember,
        })
        .await?;

    // Max-Age follows the remember flag
    let cookie = set_cookie_header(
        &state.config.session_cookie().with_max_age(output.session_max_age_secs),
        &output.session_token,
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Login successful",
            token: output.token,
            user: UserResponse::from(&output.user),
        }),
    ))
}

/// POST /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(identity): CurrentUser,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    SignOutUseCase::new(state.repo.clone(), state.config.clone())
        .execute(token.as_deref())
        .await?;

    tracing::debug!(user_id = %identity.user_id, "Logout");

    Ok((
        [(header::SET_COOKIE, delete_cookie_header(&state.config.session_cookie()))],
        Json(MessageResponse {
            message: "Logout successful",
        }),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /auth/me, GET /user/profile
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .get(&identity.user_id)
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// PUT /user/settings
pub async fn update_settings<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .update_settings(
            &identity.user_id,
            identity.session_id(),
            UpdateSettingsInput {
                name: req.name,
                email: req.email,
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// DELETE /user/avatar
pub async fn delete_avatar<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .clear_avatar(&identity.user_id)
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    AdminUser(_admin): AdminUser,
) -> AuthResult<Json<UsersResponse>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let users = ManageUsersUseCase::new(state.repo.clone()).list().await?;

    Ok(Json(UsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /admin/users/{id}/role
pub async fn change_role<R>(
    State(state): State<AuthAppState<R>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
    Json(req): Json<ChangeRoleRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user_id = UserId::parse_str(&user_id).ok_or(AuthError::UserNotFound)?;
    let role = req
        .role
        .ok_or_else(|| AuthError::Validation("Missing required field: role".to_string()))?;

    let user = ManageUsersUseCase::new(state.repo.clone())
        .change_role(&user_id, &role)
        .await?;

    tracing::info!(admin_id = %admin.user_id, user_id = %user.user_id, "Role updated by admin");

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}
