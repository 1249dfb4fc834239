//! Update Prompt Use Case
//!
//! Content edits. The author and the moderation status are never changed
//! here.

use std::sync::Arc;

use auth::{AuthError, Identity, UserRole, require_role};

use crate::domain::entities::PromptView;
use crate::domain::repository::{LanguageRepository, PromptRepository};
use crate::domain::services::PromptDraft;
use crate::domain::value_objects::PromptId;
use crate::error::{PromptError, PromptResult};

#[derive(Debug, Clone, Default)]
pub struct UpdatePromptInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

/// Who may edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Only the prompt's author
    Own,
    /// Any prompt; requires ADMIN
    Any,
}

pub struct UpdatePromptUseCase<P, L>
where
    P: PromptRepository,
    L: LanguageRepository,
{
    prompt_repo: Arc<P>,
    language_repo: Arc<L>,
}

impl<P, L> UpdatePromptUseCase<P, L>
where
    P: PromptRepository,
    L: LanguageRepository,
{
    pub fn new(prompt_repo: Arc<P>, language_repo: Arc<L>) -> Self {
        Self {
            prompt_repo,
            language_repo,
        }
    }

    pub async fn execute(
        &self,
        editor: &Identity,
        scope: EditScope,
        prompt_id: &str,
        input: UpdatePromptInput,
    ) -> PromptResult<PromptView> {
        if scope == EditScope::Any {
            require_role(Some(editor), UserRole::Admin)?;
        }

        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;
        let mut prompt = self
            .prompt_repo
            .find_prompt(&prompt_id)
            .await?
            .ok_or(PromptError::PromptNotFound)?;

        if scope == EditScope::Own && !prompt.is_authored_by(&editor.user_id) {
            return Err(AuthError::Forbidden.into());
        }

        let draft = PromptDraft::new(input.title, input.content, input.language)?;
        let language = self
            .language_repo
            .find_language(&draft.language_id)
            .await?
            .ok_or(PromptError::InvalidLanguage)?;

        prompt.edit(draft.title, draft.content, language.language_id);
        self.prompt_repo.update_prompt_content(&prompt).await?;

        tracing::info!(
            prompt_id = %prompt.prompt_id,
            editor_id = %editor.user_id,
            "Prompt edited"
        );

        self.prompt_repo
            .find_prompt_view(&prompt_id)
            .await?
            .ok_or(PromptError::PromptNotFound)
    }
}
