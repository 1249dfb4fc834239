//! Moderate Prompt Use Case
//!
//! Admin-only status changes. Moving a prompt to PUBLISHED or REJECTED
//! appends a review record in the same write as the status change.

use std::sync::Arc;

use auth::{Identity, UserRole, require_role};

use crate::domain::entities::{PromptView, Review};
use crate::domain::repository::{PromptRepository, ReviewRepository};
use crate::domain::value_objects::{PromptId, PromptStatus};
use crate::error::{PromptError, PromptResult};

#[derive(Debug, Clone, Default)]
pub struct ModerateInput {
    pub status: Option<String>,
    pub comment: Option<String>,
}

pub struct ModeratePromptUseCase<P>
where
    P: PromptRepository,
{
    prompt_repo: Arc<P>,
}

impl<P> ModeratePromptUseCase<P>
where
    P: PromptRepository,
{
    pub fn new(prompt_repo: Arc<P>) -> Self {
        Self { prompt_repo }
    }

    /// Any status may move to any other status; the guard runs before
    /// anything is read.
    pub async fn execute(
        &self,
        moderator: Option<&Identity>,
        prompt_id: &str,
        input: ModerateInput,
    ) -> PromptResult<PromptView> {
        let moderator = require_role(moderator, UserRole::Admin)?;

        let status = input
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PromptError::Validation("Missing required field: status".to_string()))?;
        let status = PromptStatus::from_code(status)
            .ok_or_else(|| PromptError::Validation(format!("Invalid status: {status}")))?;

        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;
        let mut prompt = self
            .prompt_repo
            .find_prompt(&prompt_id)
            .await?
            .ok_or(PromptError::PromptNotFound)?;

        let previous = prompt.status;
        prompt.set_status(status);

        let comment = input
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let review = status
            .review_status()
            .map(|outcome| Review::new(prompt_id, moderator.user_id, outcome, comment));

        self.prompt_repo
            .save_moderation(&prompt, review.as_ref())
            .await?;

        tracing::info!(
            prompt_id = %prompt_id,
            moderator_id = %moderator.user_id,
            from = %previous,
            to = %status,
            reviewed = review.is_some(),
            "Prompt status changed"
        );

        self.prompt_repo
            .find_prompt_view(&prompt_id)
            .await?
            .ok_or(PromptError::PromptNotFound)
    }
}

/// Admin view of a prompt's review history
pub struct ListReviewsUseCase<P, R>
where
    P: PromptRepository,
    R: ReviewRepository,
{
    prompt_repo: Arc<P>,
    review_repo: Arc<R>,
}

impl<P, R> ListReviewsUseCase<P, R>
where
    P: PromptRepository,
    R: ReviewRepository,
{
    pub fn new(prompt_repo: Arc<P>, review_repo: Arc<R>) -> Self {
        Self {
            prompt_repo,
            review_repo,
        }
    }

    pub async fn execute(
        &self,
        viewer: Option<&Identity>,
        prompt_id: &str,
    ) -> PromptResult<Vec<Review>> {
        require_role(viewer, UserRole::Admin)?;

        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;
        if self.prompt_repo.find_prompt(&prompt_id).await?.is_none() {
            return Err(PromptError::PromptNotFound);
        }

        self.review_repo.list_reviews(&prompt_id).await
    }
}
