//! Create Prompt Use Case

use std::sync::Arc;

use auth::Identity;

use crate::domain::entities::{Prompt, PromptView};
use crate::domain::repository::{LanguageRepository, PromptRepository};
use crate::domain::services::{PromptDraft, parse_prompt_type};
use crate::error::{PromptError, PromptResult};

/// Raw create request
#[derive(Debug, Clone, Default)]
pub struct CreatePromptInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub prompt_type: Option<String>,
}

pub struct CreatePromptUseCase<P, L>
where
    P: PromptRepository,
    L: LanguageRepository,
{
    prompt_repo: Arc<P>,
    language_repo: Arc<L>,
}

impl<P, L> CreatePromptUseCase<P, L>
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

    /// The new prompt is authored by `author` and starts out PENDING
    pub async fn execute(
        &self,
        author: &Identity,
        input: CreatePromptInput,
    ) -> PromptResult<PromptView> {
        let draft = PromptDraft::new(input.title, input.content, input.language)?;
        let prompt_type = parse_prompt_type(input.prompt_type.as_deref())?;

        let language = self
            .language_repo
            .find_language(&draft.language_id)
            .await?
            .ok_or(PromptError::InvalidLanguage)?;

        let prompt = Prompt::new(
            author.user_id,
            draft.title,
            draft.content,
            language.language_id,
            prompt_type,
        );
        self.prompt_repo.create_prompt(&prompt).await?;

        tracing::info!(
            prompt_id = %prompt.prompt_id,
            author_id = %prompt.author_id,
            language = %language.slug,
            "Prompt submitted for review"
        );

        self.prompt_repo
            .find_prompt_view(&prompt.prompt_id)
            .await?
            .ok_or_else(|| PromptError::Internal("created prompt vanished".to_string()))
    }
}
