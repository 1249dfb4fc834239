//! Language Use Cases
//!
//! Language catalogue, admin creation and the aggregate prompt stats.

use std::sync::Arc;

use auth::{Identity, UserRole, require_role};

use crate::application::config::PromptsConfig;
use crate::domain::entities::{Language, LanguageWithCount, PromptStats};
use crate::domain::repository::{LanguageRepository, PromptRepository};
use crate::domain::services::required;
use crate::domain::value_objects::LanguageSlug;
use crate::error::PromptResult;

#[derive(Debug, Clone, Default)]
pub struct CreateLanguageInput {
    pub name: Option<String>,
    pub name_localized: Option<String>,
    pub slug: Option<String>,
}

/// Languages by popularity plus the total published prompt count
#[derive(Debug, Clone)]
pub struct LanguageCatalogue {
    pub languages: Vec<LanguageWithCount>,
    pub total_prompts: i64,
}

pub struct LanguagesUseCase<P, L>
where
    P: PromptRepository,
    L: LanguageRepository,
{
    prompt_repo: Arc<P>,
    language_repo: Arc<L>,
    config: Arc<PromptsConfig>,
}

impl<P, L> LanguagesUseCase<P, L>
where
    P: PromptRepository,
    L: LanguageRepository,
{
    pub fn new(prompt_repo: Arc<P>, language_repo: Arc<L>, config: Arc<PromptsConfig>) -> Self {
        Self {
            prompt_repo,
            language_repo,
            config,
        }
    }

    pub async fn catalogue(&self) -> PromptResult<LanguageCatalogue> {
        let languages = self.language_repo.list_languages_with_counts().await?;
        let total_prompts = languages.iter().map(|l| l.prompts_count).sum();

        Ok(LanguageCatalogue {
            languages,
            total_prompts,
        })
    }

    pub async fn create(
        &self,
        caller: Option<&Identity>,
        input: CreateLanguageInput,
    ) -> PromptResult<Language> {
        let admin = require_role(caller, UserRole::Admin)?;

        let name = required("name", input.name)?.trim().to_string();
        let name_localized = required("name_localized", input.name_localized)?
            .trim()
            .to_string();
        let slug = LanguageSlug::new(required("slug", input.slug)?)?;

        let language = Language::new(name, name_localized, slug);
        self.language_repo.create_language(&language).await?;

        tracing::info!(
            language_id = %language.language_id,
            slug = %language.slug,
            admin_id = %admin.user_id,
            "Language created"
        );

        Ok(language)
    }

    pub async fn stats(&self) -> PromptResult<PromptStats> {
        self.prompt_repo
            .prompt_stats(self.config.popular_threshold)
            .await
    }
}
