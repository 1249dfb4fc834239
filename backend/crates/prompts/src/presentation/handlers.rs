//! HTTP Handlers

use std::sync::Arc;

use auth::Identity;
use auth::middleware::{CurrentUser, MaybeUser};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{Json, Query};

use crate::application::{
    CreateLanguageInput, CreatePromptInput, CreatePromptUseCase, DeletePromptUseCase, EditScope,
    LanguagesUseCase, ListPromptsUseCase, ListQuery, ListReviewsUseCase, ModerateInput,
    ModeratePromptUseCase, PromptsConfig, RecountUseCase, ToggleEngagementUseCase,
    UpdatePromptInput, UpdatePromptUseCase,
};
use crate::domain::entities::{PromptItem, PromptView};
use crate::domain::repository::PromptStore;
use crate::domain::value_objects::EngagementKind;
use crate::error::PromptResult;
use crate::presentation::dto::{
    CreateLanguageRequest, CreatePromptRequest, FavoriteResponse, LanguageMessageResponse,
    LanguageResponse, LanguagesResponse, LikeResponse, ListPromptsQuery, MessageResponse,
    PromptEnvelope, PromptListResponse, PromptMessageResponse, PromptResponse, PromptsResponse,
    RecountResponse, ReviewResponse, ReviewsResponse, StatsResponse, UpdatePromptRequest,
    UpdateStatusRequest,
};

/// Shared state for prompt handlers
pub struct PromptsAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<PromptsConfig>,
}

impl<R> PromptsAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<PromptsConfig>) -> Self {
        Self { repo, config }
    }

    fn list_use_case(&self) -> ListPromptsUseCase<R, R, R>
    where
        R: PromptStore,
    {
        ListPromptsUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }
}

impl<R> Clone for PromptsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl From<ListPromptsQuery> for ListQuery {
    fn from(q: ListPromptsQuery) -> Self {
        Self {
            page: q.page,
            per_page: q.per_page,
            order: q.order,
            language: q.language,
            status: q.status,
        }
    }
}

/// A freshly written prompt as seen by its writer
async fn written<R: PromptStore>(
    state: &PromptsAppState<R>,
    writer: &Identity,
    view: PromptView,
) -> PromptResult<PromptResponse> {
    let item = state.list_use_case().decorate_one(writer, view).await?;
    Ok(PromptResponse::from(item))
}

fn responses(items: Vec<PromptItem>) -> Vec<PromptResponse> {
    items.into_iter().map(PromptResponse::from).collect()
}

// ============================================================================
// Public listing and detail
// ============================================================================

/// GET /prompts
pub async fn list_prompts<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<ListPromptsQuery>,
) -> PromptResult<Json<PromptListResponse>> {
    let query = ListQuery {
        status: None,
        ..query.into()
    };
    let page = state.list_use_case().public(viewer.as_ref(), query).await?;

    Ok(Json(PromptListResponse {
        prompts: responses(page.items),
        pagination: page.pagination,
    }))
}

/// GET /prompts/{id}
pub async fn get_prompt<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    MaybeUser(viewer): MaybeUser,
    Path(prompt_id): Path<String>,
) -> PromptResult<Json<PromptEnvelope>> {
    let item = state
        .list_use_case()
        .get(viewer.as_ref(), &prompt_id)
        .await?;

    Ok(Json(PromptEnvelope {
        prompt: PromptResponse::from(item),
    }))
}

/// GET /prompts/stats
pub async fn prompt_stats<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
) -> PromptResult<Json<StatsResponse>> {
    let stats = LanguagesUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .stats()
        .await?;

    Ok(Json(StatsResponse::from(stats)))
}

// ============================================================================
// Authoring
// ============================================================================

/// POST /prompts
pub async fn create_prompt<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Json(req): Json<CreatePromptRequest>,
) -> PromptResult<impl IntoResponse> {
    let view = CreatePromptUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            &identity,
            CreatePromptInput {
                title: req.title,
                content: req.content,
                language: req.language,
                prompt_type: req.prompt_type,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PromptMessageResponse {
            message: "Prompt created successfully",
            prompt: written(&state, &identity, view).await?,
        }),
    ))
}

async fn update<R: PromptStore>(
    state: &PromptsAppState<R>,
    identity: &Identity,
    scope: EditScope,
    prompt_id: &str,
    req: UpdatePromptRequest,
) -> PromptResult<Json<PromptMessageResponse>> {
    let view = UpdatePromptUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            identity,
            scope,
            prompt_id,
            UpdatePromptInput {
                title: req.title,
                content: req.content,
                language: req.language,
            },
        )
        .await?;

    Ok(Json(PromptMessageResponse {
        message: "Prompt updated successfully",
        prompt: written(state, identity, view).await?,
    }))
}

/// PUT /prompts/{id}
pub async fn update_own_prompt<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
    Json(req): Json<UpdatePromptRequest>,
) -> PromptResult<Json<PromptMessageResponse>> {
    update(&state, &identity, EditScope::Own, &prompt_id, req).await
}

/// PUT /admin/prompts/{id}
pub async fn admin_update_prompt<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
    Json(req): Json<UpdatePromptRequest>,
) -> PromptResult<Json<PromptMessageResponse>> {
    update(&state, &identity, EditScope::Any, &prompt_id, req).await
}

// ============================================================================
// Engagement
// ============================================================================

/// POST /prompts/{id}/like
pub async fn toggle_like<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
) -> PromptResult<Json<LikeResponse>> {
    let result = ToggleEngagementUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&identity, &prompt_id, EngagementKind::Like)
        .await?;

    Ok(Json(LikeResponse {
        message: if result.active {
            "Prompt liked"
        } else {
            "Prompt unliked"
        },
        is_liked: result.active,
        likes_count: result.count,
    }))
}

/// POST /prompts/{id}/favorite
pub async fn toggle_favorite<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
) -> PromptResult<Json<FavoriteResponse>> {
    let result = ToggleEngagementUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&identity, &prompt_id, EngagementKind::Favorite)
        .await?;

    Ok(Json(FavoriteResponse {
        message: if result.active {
            "Prompt favorited"
        } else {
            "Prompt unfavorited"
        },
        is_favorited: result.active,
        favorites_count: result.count,
    }))
}

// ============================================================================
// User collections
// ============================================================================

/// GET /user/prompts
pub async fn my_prompts<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> PromptResult<Json<PromptsResponse>> {
    let items = state.list_use_case().by_author(&identity).await?;
    Ok(Json(PromptsResponse {
        prompts: responses(items),
    }))
}

/// GET /user/likes
pub async fn my_likes<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> PromptResult<Json<PromptsResponse>> {
    let items = state
        .list_use_case()
        .engaged(&identity, EngagementKind::Like)
        .await?;
    Ok(Json(PromptsResponse {
        prompts: responses(items),
    }))
}

/// GET /user/favorites
pub async fn my_favorites<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> PromptResult<Json<PromptsResponse>> {
    let items = state
        .list_use_case()
        .engaged(&identity, EngagementKind::Favorite)
        .await?;
    Ok(Json(PromptsResponse {
        prompts: responses(items),
    }))
}

// ============================================================================
// Languages
// ============================================================================

/// GET /languages
pub async fn list_languages<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
) -> PromptResult<Json<LanguagesResponse>> {
    let catalogue =
        LanguagesUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
            .catalogue()
            .await?;

    Ok(Json(LanguagesResponse {
        languages: catalogue
            .languages
            .into_iter()
            .map(LanguageResponse::from)
            .collect(),
        total_prompts: catalogue.total_prompts,
    }))
}

/// POST /admin/languages
pub async fn create_language<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Json(req): Json<CreateLanguageRequest>,
) -> PromptResult<impl IntoResponse> {
    let language =
        LanguagesUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
            .create(
                Some(&identity),
                CreateLanguageInput {
                    name: req.name,
                    name_localized: req.name_localized,
                    slug: req.slug,
                },
            )
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(LanguageMessageResponse {
            message: "Language created successfully",
            language: LanguageResponse::from(language),
        }),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/prompts
pub async fn admin_list_prompts<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<ListPromptsQuery>,
) -> PromptResult<Json<PromptListResponse>> {
    let page = state
        .list_use_case()
        .admin(Some(&identity), query.into())
        .await?;

    Ok(Json(PromptListResponse {
        prompts: responses(page.items),
        pagination: page.pagination,
    }))
}

/// PUT /admin/prompts/{id}/status
pub async fn update_prompt_status<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> PromptResult<Json<PromptMessageResponse>> {
    let view = ModeratePromptUseCase::new(state.repo.clone())
        .execute(
            Some(&identity),
            &prompt_id,
            ModerateInput {
                status: req.status,
                comment: req.comment,
            },
        )
        .await?;

    Ok(Json(PromptMessageResponse {
        message: "Prompt status updated successfully",
        prompt: written(&state, &identity, view).await?,
    }))
}

/// GET /admin/prompts/{id}/reviews
pub async fn prompt_reviews<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
) -> PromptResult<Json<ReviewsResponse>> {
    let reviews = ListReviewsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(Some(&identity), &prompt_id)
        .await?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

/// DELETE /admin/prompts/{id}
pub async fn delete_prompt<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(prompt_id): Path<String>,
) -> PromptResult<Json<MessageResponse>> {
    DeletePromptUseCase::new(state.repo.clone())
        .execute(Some(&identity), &prompt_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Prompt deleted successfully",
    }))
}

/// POST /admin/maintenance/recount
pub async fn recount<R: PromptStore>(
    State(state): State<PromptsAppState<R>>,
    CurrentUser(identity): CurrentUser,
) -> PromptResult<Json<RecountResponse>> {
    let report = RecountUseCase::new(state.repo.clone())
        .execute(Some(&identity))
        .await?;

    Ok(Json(RecountResponse {
        message: "Recount finished",
        prompts_updated: report.prompts_updated,
        languages_updated: report.languages_updated,
    }))
}
