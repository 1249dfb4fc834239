//! Delete Prompt Use Case

use std::sync::Arc;

use auth::{Identity, UserRole, require_role};

use crate::domain::repository::PromptRepository;
use crate::domain::value_objects::PromptId;
use crate::error::{PromptError, PromptResult};

pub struct DeletePromptUseCase<P>
where
    P: PromptRepository,
{
    prompt_repo: Arc<P>,
}

impl<P> DeletePromptUseCase<P>
where
    P: PromptRepository,
{
    pub fn new(prompt_repo: Arc<P>) -> Self {
        Self { prompt_repo }
    }

    /// Removes the prompt together with every like, favorite and review
    /// referencing it.
    pub async fn execute(&self, caller: Option<&Identity>, prompt_id: &str) -> PromptResult<()> {
        let admin = require_role(caller, UserRole::Admin)?;

        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;
        if !self.prompt_repo.delete_prompt_cascade(&prompt_id).await? {
            return Err(PromptError::PromptNotFound);
        }

        tracing::info!(prompt_id = %prompt_id, admin_id = %admin.user_id, "Prompt deleted");
        Ok(())
    }
}
