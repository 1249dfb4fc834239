//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::collections::HashSet;

use auth::UserId;
use kernel::pagination::{Page, PageRequest};

use crate::domain::entities::{
    EngagementState, Language, LanguageWithCount, Prompt, PromptStats, PromptView, Review,
};
use crate::domain::value_objects::{
    EngagementKind, LanguageId, LanguageSlug, ListingOrder, PromptId, PromptStatus,
};
use crate::error::PromptResult;

/// Listing filter. `None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct PromptFilter {
    pub status: Option<PromptStatus>,
    pub language_id: Option<LanguageId>,
    pub author_id: Option<UserId>,
    pub order: ListingOrder,
}

impl PromptFilter {
    pub fn published() -> Self {
        Self {
            status: Some(PromptStatus::Published),
            ..Default::default()
        }
    }
}

/// Prompt repository trait
#[trait_variant::make(PromptRepository: Send)]
pub trait LocalPromptRepository {
    async fn create_prompt(&self, prompt: &Prompt) -> PromptResult<()>;

    async fn find_prompt(&self, prompt_id: &PromptId) -> PromptResult<Option<Prompt>>;

    async fn find_prompt_view(&self, prompt_id: &PromptId) -> PromptResult<Option<PromptView>>;

    /// Persist title, content and language
    async fn update_prompt_content(&self, prompt: &Prompt) -> PromptResult<()>;

    /// Persist a status change together with its review record, atomically
    async fn save_moderation(&self, prompt: &Prompt, review: Option<&Review>) -> PromptResult<()>;

    async fn list_prompts(
        &self,
        filter: &PromptFilter,
        page: &PageRequest,
    ) -> PromptResult<Page<PromptView>>;

    /// Every prompt by `author_id`, newest first
    async fn list_prompts_by_author(&self, author_id: &UserId) -> PromptResult<Vec<PromptView>>;

    /// Prompts `user_id` liked or favorited, newest first
    async fn list_engaged_prompts(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
    ) -> PromptResult<Vec<PromptView>>;

    /// Delete likes, favorites, reviews and then the prompt, in that order.
    ///
    /// Returns false when the prompt did not exist.
    async fn delete_prompt_cascade(&self, prompt_id: &PromptId) -> PromptResult<bool>;

    async fn prompt_stats(&self, popular_threshold: i64) -> PromptResult<PromptStats>;
}

/// Like / favorite relation sets and their counters
#[trait_variant::make(EngagementRepository: Send)]
pub trait LocalEngagementRepository {
    /// Flip the relation and adjust the counter as one atomic unit.
    ///
    /// The counter never goes below zero.
    async fn toggle_engagement(
        &self,
        user_id: &UserId,
        prompt_id: &PromptId,
        kind: EngagementKind,
    ) -> PromptResult<EngagementState>;

    /// Subset of `prompt_ids` the user has a relation with
    async fn engaged_prompt_ids(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
        prompt_ids: &[PromptId],
    ) -> PromptResult<HashSet<PromptId>>;

    /// Relations referencing `prompt_id`
    async fn count_relations(&self, prompt_id: &PromptId, kind: EngagementKind)
    -> PromptResult<u64>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Review history of a prompt, newest first
    async fn list_reviews(&self, prompt_id: &PromptId) -> PromptResult<Vec<Review>>;
}

/// Language repository trait
#[trait_variant::make(LanguageRepository: Send)]
pub trait LocalLanguageRepository {
    /// Fails with `PromptError::SlugTaken` on a duplicate slug
    async fn create_language(&self, language: &Language) -> PromptResult<()>;

    async fn find_language(&self, language_id: &LanguageId) -> PromptResult<Option<Language>>;

    async fn find_language_by_slug(&self, slug: &LanguageSlug) -> PromptResult<Option<Language>>;

    /// All languages by popularity, each with its published prompt count
    async fn list_languages_with_counts(&self) -> PromptResult<Vec<LanguageWithCount>>;
}

/// Batch recomputation of derived values
#[trait_variant::make(MaintenanceRepository: Send)]
pub trait LocalMaintenanceRepository {
    /// Reset every prompt's counters to the size of its relation sets
    async fn recount_engagement_counters(&self) -> PromptResult<u64>;

    /// popularity = published prompts + likes on published prompts
    async fn recompute_language_popularity(&self) -> PromptResult<u64>;
}

/// Everything the HTTP layer needs from one storage backend
pub trait PromptStore:
    PromptRepository
    + EngagementRepository
    + ReviewRepository
    + LanguageRepository
    + MaintenanceRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> PromptStore for T where
    T: PromptRepository
        + EngagementRepository
        + ReviewRepository
        + LanguageRepository
        + MaintenanceRepository
        + Send
        + Sync
        + 'static
{
}
