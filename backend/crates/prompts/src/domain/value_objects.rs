//! Domain Value Objects

use std::fmt;

use kernel::id::Id;
use serde::{Deserialize, Serialize};

use crate::error::{PromptError, PromptResult};

// ============================================================================
// Identifiers
// ============================================================================

pub struct PromptMarker;
pub type PromptId = Id<PromptMarker>;

pub struct LanguageMarker;
pub type LanguageId = Id<LanguageMarker>;

pub struct ReviewMarker;
pub type ReviewId = Id<ReviewMarker>;

// ============================================================================
// Prompt Status
// ============================================================================

/// Moderation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum PromptStatus {
    #[default]
    Pending = 0,
    Published = 1,
    Rejected = 2,
}

impl PromptStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub const fn code(&self) -> &'static str {
        match self {
            PromptStatus::Pending => "PENDING",
            PromptStatus::Published => "PUBLISHED",
            PromptStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PromptStatus::Pending),
            1 => Some(PromptStatus::Published),
            2 => Some(PromptStatus::Rejected),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(PromptStatus::Pending),
            "PUBLISHED" => Some(PromptStatus::Published),
            "REJECTED" => Some(PromptStatus::Rejected),
            _ => None,
        }
    }

    /// Review outcome recorded when moving into this status
    pub const fn review_status(&self) -> Option<ReviewStatus> {
        match self {
            PromptStatus::Pending => None,
            PromptStatus::Published => Some(ReviewStatus::Published),
            PromptStatus::Rejected => Some(ReviewStatus::Rejected),
        }
    }
}

impl fmt::Display for PromptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Review Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum ReviewStatus {
    Published = 1,
    Rejected = 2,
}

impl ReviewStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(ReviewStatus::Published),
            2 => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

// ============================================================================
// Prompt Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum PromptType {
    #[default]
    Prompt = 0,
    Completion = 1,
}

impl PromptType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PromptType::Prompt),
            1 => Some(PromptType::Completion),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PROMPT" => Some(PromptType::Prompt),
            "COMPLETION" => Some(PromptType::Completion),
            _ => None,
        }
    }
}

// ============================================================================
// Listing Order
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    /// Newest first
    #[default]
    Newest,
    /// Most liked first, newest first among ties
    Popular,
}

impl ListingOrder {
    /// `type` query parameter: absent or `all` → newest, `popular` → popular
    pub fn from_query(value: Option<&str>) -> PromptResult<Self> {
        match value {
            None | Some("all") => Ok(ListingOrder::Newest),
            Some("popular") => Ok(ListingOrder::Popular),
            Some(other) => Err(PromptError::Validation(format!(
                "Invalid listing type: {other}"
            ))),
        }
    }
}

// ============================================================================
// Engagement Kind
// ============================================================================

/// The two engagement relations. Each has its own relation set and its own
/// denormalized counter on the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngagementKind {
    Like,
    Favorite,
}

impl EngagementKind {
    pub const ALL: [EngagementKind; 2] = [EngagementKind::Like, EngagementKind::Favorite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like",
            EngagementKind::Favorite => "favorite",
        }
    }

    /// Relation table
    pub const fn table(&self) -> &'static str {
        match self {
            EngagementKind::Like => "prompt_likes",
            EngagementKind::Favorite => "prompt_favorites",
        }
    }

    /// Counter column on `prompts`
    pub const fn counter_column(&self) -> &'static str {
        match self {
            EngagementKind::Like => "likes_count",
            EngagementKind::Favorite => "favorites_count",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Language Slug
// ============================================================================

pub const LANGUAGE_SLUG_MAX_LENGTH: usize = 64;

/// Lowercase slug made of `[a-z0-9-+#.]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageSlug(String);

impl LanguageSlug {
    pub fn new(raw: impl AsRef<str>) -> PromptResult<Self> {
        let slug = raw.as_ref().trim().to_lowercase();

        if slug.is_empty() {
            return Err(PromptError::Validation("Slug cannot be empty".to_string()));
        }
        if slug.chars().count() > LANGUAGE_SLUG_MAX_LENGTH {
            return Err(PromptError::Validation(format!(
                "Slug must be at most {LANGUAGE_SLUG_MAX_LENGTH} characters"
            )));
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-+#.".contains(c))
        {
            return Err(PromptError::Validation(
                "Slug may only contain a-z, 0-9, '-', '+', '#' and '.'".to_string(),
            ));
        }

        Ok(Self(slug))
    }

    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
