//! Toggle Engagement Use Case
//!
//! Like and favorite share one flow; only the relation set and the counter
//! differ.

use std::sync::Arc;

use auth::Identity;

use crate::domain::entities::EngagementState;
use crate::domain::repository::{EngagementRepository, PromptRepository};
use crate::domain::value_objects::{EngagementKind, PromptId};
use crate::error::{PromptError, PromptResult};

pub struct ToggleEngagementUseCase<P, E>
where
    P: PromptRepository,
    E: EngagementRepository,
{
    prompt_repo: Arc<P>,
    engagement_repo: Arc<E>,
}

impl<P, E> ToggleEngagementUseCase<P, E>
where
    P: PromptRepository,
    E: EngagementRepository,
{
    pub fn new(prompt_repo: Arc<P>, engagement_repo: Arc<E>) -> Self {
        Self {
            prompt_repo,
            engagement_repo,
        }
    }

    pub async fn execute(
        &self,
        user: &Identity,
        prompt_id: &str,
        kind: EngagementKind,
    ) -> PromptResult<EngagementState> {
        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;

        // Prompts the caller cannot see are treated as missing
        let visible = self
            .prompt_repo
            .find_prompt(&prompt_id)
            .await?
            .is_some_and(|p| p.is_visible_to(Some(user)));
        if !visible {
            return Err(PromptError::PromptNotFound);
        }

        let state = self
            .engagement_repo
            .toggle_engagement(&user.user_id, &prompt_id, kind)
            .await?;

        tracing::debug!(
            prompt_id = %prompt_id,
            user_id = %user.user_id,
            kind = %kind,
            active = state.active,
            count = state.count,
            "Engagement toggled"
        );

        Ok(state)
    }
}
