//! Prompt Read Use Cases
//!
//! Listings and detail lookups. Every returned item is decorated with the
//! viewer's like and favorite flags.

use std::collections::HashSet;
use std::sync::Arc;

use auth::{Identity, UserId, UserRole, require_role};
use kernel::pagination::{Page, PageRequest};

use crate::application::config::PromptsConfig;
use crate::domain::entities::{PromptItem, PromptView};
use crate::domain::repository::{
    EngagementRepository, LanguageRepository, PromptFilter, PromptRepository,
};
use crate::domain::value_objects::{
    EngagementKind, LanguageId, LanguageSlug, ListingOrder, PromptId, PromptStatus,
};
use crate::error::{PromptError, PromptResult};

/// Raw listing query
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// `all` or `popular`
    pub order: Option<String>,
    /// Language slug
    pub language: Option<String>,
    /// Status code; admin listing only
    pub status: Option<String>,
}

pub struct ListPromptsUseCase<P, E, L>
where
    P: PromptRepository,
    E: EngagementRepository,
    L: LanguageRepository,
{
    prompt_repo: Arc<P>,
    engagement_repo: Arc<E>,
    language_repo: Arc<L>,
    config: Arc<PromptsConfig>,
}

impl<P, E, L> ListPromptsUseCase<P, E, L>
where
    P: PromptRepository,
    E: EngagementRepository,
    L: LanguageRepository,
{
    pub fn new(
        prompt_repo: Arc<P>,
        engagement_repo: Arc<E>,
        language_repo: Arc<L>,
        config: Arc<PromptsConfig>,
    ) -> Self {
        Self {
            prompt_repo,
            engagement_repo,
            language_repo,
            config,
        }
    }

    /// Public listing: PUBLISHED prompts only
    pub async fn public(
        &self,
        viewer: Option<&Identity>,
        query: ListQuery,
    ) -> PromptResult<Page<PromptItem>> {
        let request = PageRequest::new(
            query.page,
            query.per_page,
            self.config.public_per_page,
            self.config.max_per_page,
        )?;
        let order = ListingOrder::from_query(query.order.as_deref())?;

        let mut filter = PromptFilter::published();
        filter.order = order;

        filter.language_id = self.language_filter(query.language.as_deref()).await?;

        let page = self.prompt_repo.list_prompts(&filter, &request).await?;
        self.decorate_page(viewer, page).await
    }

    /// Admin listing: every prompt, optionally narrowed by status
    pub async fn admin(
        &self,
        viewer: Option<&Identity>,
        query: ListQuery,
    ) -> PromptResult<Page<PromptItem>> {
        let admin = require_role(viewer, UserRole::Admin)?;

        let request = PageRequest::new(
            query.page,
            query.per_page,
            self.config.admin_per_page,
            self.config.max_per_page,
        )?;
        let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(code) => Some(
                PromptStatus::from_code(code)
                    .ok_or_else(|| PromptError::Validation(format!("Invalid status: {code}")))?,
            ),
        };

        let filter = PromptFilter {
            status,
            order: ListingOrder::from_query(query.order.as_deref())?,
            ..Default::default()
        };

        let page = self.prompt_repo.list_prompts(&filter, &request).await?;
        self.decorate_page(Some(admin), page).await
    }

    /// Detail lookup. Unpublished prompts are only served to their author
    /// and to admins; anyone else gets NotFound.
    pub async fn get(&self, viewer: Option<&Identity>, prompt_id: &str) -> PromptResult<PromptItem> {
        let prompt_id = PromptId::parse_str(prompt_id).ok_or(PromptError::PromptNotFound)?;
        let view = self
            .prompt_repo
            .find_prompt_view(&prompt_id)
            .await?
            .filter(|v| v.prompt.is_visible_to(viewer))
            .ok_or(PromptError::PromptNotFound)?;

        let mut items = self.decorate(viewer, vec![view]).await?;
        items.pop().ok_or(PromptError::PromptNotFound)
    }

    /// Flags for a prompt the caller just wrote
    pub async fn decorate_one(&self, viewer: &Identity, view: PromptView) -> PromptResult<PromptItem> {
        let mut items = self.decorate(Some(viewer), vec![view]).await?;
        items.pop().ok_or(PromptError::PromptNotFound)
    }

    /// Every prompt the user authored, whatever its status
    pub async fn by_author(&self, user: &Identity) -> PromptResult<Vec<PromptItem>> {
        let views = self
            .prompt_repo
            .list_prompts_by_author(&user.user_id)
            .await?;
        self.decorate(Some(user), views).await
    }

    /// Prompts the user liked or favorited
    pub async fn engaged(
        &self,
        user: &Identity,
        kind: EngagementKind,
    ) -> PromptResult<Vec<PromptItem>> {
        let views = self
            .prompt_repo
            .list_engaged_prompts(&user.user_id, kind)
            .await?;
        self.decorate(Some(user), views).await
    }

    /// Unknown or malformed slugs leave the listing unfiltered
    async fn language_filter(
        &self,
        slug: Option<&str>,
    ) -> PromptResult<Option<LanguageId>> {
        let Some(slug) = slug.and_then(|s| LanguageSlug::new(s).ok()) else {
            return Ok(None);
        };
        let language = self.language_repo.find_language_by_slug(&slug).await?;
        Ok(language.map(|language| language.language_id))
    }

    async fn decorate_page(
        &self,
        viewer: Option<&Identity>,
        page: Page<PromptView>,
    ) -> PromptResult<Page<PromptItem>> {
        let Page { items, pagination } = page;
        let items = self.decorate(viewer, items).await?;
        Ok(Page { items, pagination })
    }

    async fn decorate(
        &self,
        viewer: Option<&Identity>,
        views: Vec<PromptView>,
    ) -> PromptResult<Vec<PromptItem>> {
        let Some(viewer) = viewer else {
            return Ok(views.into_iter().map(undecorated).collect());
        };
        if views.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<PromptId> = views.iter().map(|v| v.prompt.prompt_id).collect();
        let liked = self.engaged_ids(&viewer.user_id, EngagementKind::Like, &ids);
        let favorited = self.engaged_ids(&viewer.user_id, EngagementKind::Favorite, &ids);
        let (liked, favorited) = tokio::try_join!(liked, favorited)?;

        Ok(views
            .into_iter()
            .map(|view| {
                let id = view.prompt.prompt_id;
                PromptItem {
                    view,
                    is_liked: liked.contains(&id),
                    is_favorited: favorited.contains(&id),
                }
            })
            .collect())
    }

    async fn engaged_ids(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
        ids: &[PromptId],
    ) -> PromptResult<HashSet<PromptId>> {
        self.engagement_repo
            .engaged_prompt_ids(user_id, kind, ids)
            .await
    }
}

fn undecorated(view: PromptView) -> PromptItem {
    PromptItem {
        view,
        is_liked: false,
        is_favorited: false,
    }
}
