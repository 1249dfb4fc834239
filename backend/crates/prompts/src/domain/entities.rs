//! Domain Entities

use auth::{Identity, UserId};
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    LanguageId, LanguageSlug, PromptId, PromptStatus, PromptType, ReviewId, ReviewStatus,
};

// ============================================================================
// Prompt
// ============================================================================

/// A user-authored prompt with a moderation lifecycle
#[derive(Debug, Clone)]
pub struct Prompt {
    pub prompt_id: PromptId,
    pub title: String,
    pub content: String,
    pub prompt_type: PromptType,
    pub status: PromptStatus,
    pub language_id: LanguageId,
    /// Set at creation, never reassigned
    pub author_id: UserId,
    /// Cache of the like relation count
    pub likes_count: i64,
    /// Cache of the favorite relation count
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// New prompts always start out PENDING
    pub fn new(
        author_id: UserId,
        title: String,
        content: String,
        language_id: LanguageId,
        prompt_type: PromptType,
    ) -> Self {
        let now = Utc::now();

        Self {
            prompt_id: PromptId::new(),
            title,
            content,
            prompt_type,
            status: PromptStatus::Pending,
            language_id,
            author_id,
            likes_count: 0,
            favorites_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Content edit. Author and status are untouched.
    pub fn edit(&mut self, title: String, content: String, language_id: LanguageId) {
        self.title = title;
        self.content = content;
        self.language_id = language_id;
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: PromptStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn is_published(&self) -> bool {
        self.status == PromptStatus::Published
    }

    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Published prompts are public; anything else is limited to its author
    /// and admins.
    pub fn is_visible_to(&self, viewer: Option<&Identity>) -> bool {
        self.is_published()
            || viewer.is_some_and(|v| v.is_admin() || self.is_authored_by(&v.user_id))
    }
}

// ============================================================================
// Read models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: UserId,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSummary {
    pub id: LanguageId,
    pub name: String,
    pub slug: String,
}

/// Prompt joined with its author and language
#[derive(Debug, Clone)]
pub struct PromptView {
    pub prompt: Prompt,
    pub author: Option<AuthorSummary>,
    pub language: Option<LanguageSummary>,
}

/// Prompt as seen by one viewer
#[derive(Debug, Clone)]
pub struct PromptItem {
    pub view: PromptView,
    pub is_liked: bool,
    pub is_favorited: bool,
}

// ============================================================================
// Engagement
// ============================================================================

/// Result of a toggle: whether the relation now exists, and the counter
/// after the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementState {
    pub active: bool,
    pub count: i64,
}

// ============================================================================
// Language
// ============================================================================

#[derive(Debug, Clone)]
pub struct Language {
    pub language_id: LanguageId,
    pub name: String,
    pub name_localized: String,
    pub slug: LanguageSlug,
    /// Derived score, refreshed by the recount job
    pub popularity: i64,
    pub created_at: DateTime<Utc>,
}

impl Language {
    pub fn new(name: String, name_localized: String, slug: LanguageSlug) -> Self {
        Self {
            language_id: LanguageId::new(),
            name,
            name_localized,
            slug,
            popularity: 0,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> LanguageSummary {
        LanguageSummary {
            id: self.language_id,
            name: self.name.clone(),
            slug: self.slug.as_str().to_string(),
        }
    }
}

/// Language with its number of published prompts
#[derive(Debug, Clone)]
pub struct LanguageWithCount {
    pub language: Language,
    pub prompts_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub language: LanguageSummary,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptStats {
    pub total_count: i64,
    pub popular_count: i64,
    /// Languages with at least one published prompt, largest first
    pub language_stats: Vec<LanguageCount>,
}

// ============================================================================
// Review
// ============================================================================

/// Append-only record of a moderation decision
#[derive(Debug, Clone)]
pub struct Review {
    pub review_id: ReviewId,
    pub prompt_id: PromptId,
    pub reviewer_id: UserId,
    pub status: ReviewStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        prompt_id: PromptId,
        reviewer_id: UserId,
        status: ReviewStatus,
        comment: Option<String>,
    ) -> Self {
        Self {
            review_id: ReviewId::new(),
            prompt_id,
            reviewer_id,
            status,
            comment,
            created_at: Utc::now(),
        }
    }
}

/// Rows touched by a full recount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecountReport {
    pub prompts_updated: u64,
    pub languages_updated: u64,
}
