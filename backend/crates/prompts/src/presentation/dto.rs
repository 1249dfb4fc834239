//! Data Transfer Objects

use auth::UserId;
use chrono::{DateTime, Utc};
use kernel::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    AuthorSummary, Language, LanguageCount, LanguageSummary, LanguageWithCount, PromptItem,
    PromptStats, Review,
};
use crate::domain::value_objects::{
    LanguageId, PromptId, PromptStatus, PromptType, ReviewId, ReviewStatus,
};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePromptRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Language id
    pub language: Option<String>,
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePromptRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLanguageRequest {
    pub name: Option<String>,
    #[serde(alias = "name_zh")]
    pub name_localized: Option<String>,
    pub slug: Option<String>,
}

/// Listing query string
#[derive(Debug, Default, Deserialize)]
pub struct ListPromptsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// `all` or `popular`
    #[serde(rename = "type")]
    pub order: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
}

// ============================================================================
// Prompt responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: UserId,
    pub name: String,
    pub avatar_url: String,
}

impl From<AuthorSummary> for AuthorResponse {
    fn from(a: AuthorSummary) -> Self {
        Self {
            id: a.id,
            name: a.name,
            avatar_url: a.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguageRefResponse {
    pub id: LanguageId,
    pub name: String,
    pub slug: String,
}

impl From<LanguageSummary> for LanguageRefResponse {
    fn from(l: LanguageSummary) -> Self {
        Self {
            id: l.id,
            name: l.name,
            slug: l.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub id: PromptId,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub prompt_type: PromptType,
    pub status: PromptStatus,
    pub author: Option<AuthorResponse>,
    pub language: Option<LanguageRefResponse>,
    pub likes_count: i64,
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_liked: bool,
    pub is_favorited: bool,
}

impl From<PromptItem> for PromptResponse {
    fn from(item: PromptItem) -> Self {
        let PromptItem {
            view,
            is_liked,
            is_favorited,
        } = item;
        let p = view.prompt;

        Self {
            id: p.prompt_id,
            title: p.title,
            content: p.content,
            prompt_type: p.prompt_type,
            status: p.status,
            author: view.author.map(AuthorResponse::from),
            language: view.language.map(LanguageRefResponse::from),
            likes_count: p.likes_count,
            favorites_count: p.favorites_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
            is_liked,
            is_favorited,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromptListResponse {
    pub prompts: Vec<PromptResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct PromptsResponse {
    pub prompts: Vec<PromptResponse>,
}

#[derive(Debug, Serialize)]
pub struct PromptEnvelope {
    pub prompt: PromptResponse,
}

#[derive(Debug, Serialize)]
pub struct PromptMessageResponse {
    pub message: &'static str,
    pub prompt: PromptResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: &'static str,
    pub is_liked: bool,
    pub likes_count: i64,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub message: &'static str,
    pub is_favorited: bool,
    pub favorites_count: i64,
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub reviewer_id: UserId,
    pub status: ReviewStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.review_id,
            reviewer_id: r.reviewer_id,
            status: r.status,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
}

// ============================================================================
// Languages and stats
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub id: LanguageId,
    pub name: String,
    pub name_localized: String,
    pub slug: String,
    pub popularity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts_count: Option<i64>,
}

impl From<Language> for LanguageResponse {
    fn from(l: Language) -> Self {
        Self {
            id: l.language_id,
            name: l.name,
            name_localized: l.name_localized,
            slug: l.slug.as_str().to_string(),
            popularity: l.popularity,
            prompts_count: None,
        }
    }
}

impl From<LanguageWithCount> for LanguageResponse {
    fn from(l: LanguageWithCount) -> Self {
        Self {
            prompts_count: Some(l.prompts_count),
            ..LanguageResponse::from(l.language)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageResponse>,
    pub total_prompts: i64,
}

#[derive(Debug, Serialize)]
pub struct LanguageMessageResponse {
    pub message: &'static str,
    pub language: LanguageResponse,
}

#[derive(Debug, Serialize)]
pub struct LanguageStatResponse {
    pub id: LanguageId,
    pub name: String,
    pub slug: String,
    pub count: i64,
}

impl From<LanguageCount> for LanguageStatResponse {
    fn from(c: LanguageCount) -> Self {
        Self {
            id: c.language.id,
            name: c.language.name,
            slug: c.language.slug,
            count: c.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_count: i64,
    pub popular_count: i64,
    pub language_stats: Vec<LanguageStatResponse>,
}

impl From<PromptStats> for StatsResponse {
    fn from(s: PromptStats) -> Self {
        Self {
            total_count: s.total_count,
            popular_count: s.popular_count,
            language_stats: s.language_stats.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecountResponse {
    pub message: &'static str,
    pub prompts_updated: u64,
    pub languages_updated: u64,
}
