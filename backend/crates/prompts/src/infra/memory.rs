//! In-memory repository for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use auth::UserId;
use kernel::pagination::{Page, PageRequest};

use crate::domain::entities::{
    AuthorSummary, EngagementState, Language, LanguageCount, LanguageWithCount, Prompt,
    PromptStats, PromptView, Review,
};
use crate::domain::repository::{
    EngagementRepository, LanguageRepository, MaintenanceRepository, PromptFilter,
    PromptRepository, ReviewRepository,
};
use crate::domain::value_objects::{
    EngagementKind, LanguageId, LanguageSlug, ListingOrder, PromptId, PromptStatus,
};
use crate::error::{PromptError, PromptResult};

/// Relation key mapped to its insertion sequence
type Relations = HashMap<(UserId, PromptId), u64>;

#[derive(Default)]
struct State {
    prompts: HashMap<PromptId, Prompt>,
    languages: HashMap<LanguageId, Language>,
    reviews: Vec<Review>,
    likes: Relations,
    favorites: Relations,
    authors: HashMap<UserId, AuthorSummary>,
    seq: u64,
}

impl State {
    fn relations(&self, kind: EngagementKind) -> &Relations {
        match kind {
            EngagementKind::Like => &self.likes,
            EngagementKind::Favorite => &self.favorites,
        }
    }

    fn relations_mut(&mut self, kind: EngagementKind) -> &mut Relations {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Favorite => &mut self.favorites,
        }
    }

    fn view(&self, prompt: &Prompt) -> PromptView {
        PromptView {
            prompt: prompt.clone(),
            author: self.authors.get(&prompt.author_id).cloned(),
            language: self.languages.get(&prompt.language_id).map(Language::summary),
        }
    }
}

/// All state lives behind one lock so every write is atomic
#[derive(Default)]
pub struct InMemoryPromptRepository {
    state: Mutex<State>,
}

impl InMemoryPromptRepository {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Register the author summary joined into prompt views
    pub fn add_author(&self, user_id: UserId, name: &str) {
        self.state().authors.insert(
            user_id,
            AuthorSummary {
                id: user_id,
                name: name.to_string(),
                avatar_url: format!("https://avatars.test/{user_id}"),
            },
        );
    }

    /// Overwrite a cached counter without touching the relation set
    pub fn set_counter(&self, prompt_id: &PromptId, kind: EngagementKind, value: i64) {
        if let Some(p) = self.state().prompts.get_mut(prompt_id) {
            match kind {
                EngagementKind::Like => p.likes_count = value,
                EngagementKind::Favorite => p.favorites_count = value,
            }
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.state().prompts.len()
    }

    pub fn review_count(&self, prompt_id: &PromptId) -> usize {
        self.state()
            .reviews
            .iter()
            .filter(|r| &r.prompt_id == prompt_id)
            .count()
    }
}

fn sort_newest(prompts: &mut [&Prompt]) {
    prompts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.prompt_id.as_uuid().cmp(a.prompt_id.as_uuid()))
    });
}

impl PromptRepository for InMemoryPromptRepository {
    async fn create_prompt(&self, prompt: &Prompt) -> PromptResult<()> {
        self.state().prompts.insert(prompt.prompt_id, prompt.clone());
        Ok(())
    }

    async fn find_prompt(&self, prompt_id: &PromptId) -> PromptResult<Option<Prompt>> {
        Ok(self.state().prompts.get(prompt_id).cloned())
    }

    async fn find_prompt_view(&self, prompt_id: &PromptId) -> PromptResult<Option<PromptView>> {
        let state = self.state();
        Ok(state.prompts.get(prompt_id).map(|p| state.view(p)))
    }

    async fn update_prompt_content(&self, prompt: &Prompt) -> PromptResult<()> {
        let mut state = self.state();
        let stored = state
            .prompts
            .get_mut(&prompt.prompt_id)
            .ok_or(PromptError::PromptNotFound)?;
        stored.title = prompt.title.clone();
        stored.content = prompt.content.clone();
        stored.language_id = prompt.language_id;
        stored.updated_at = prompt.updated_at;
        Ok(())
    }

    async fn save_moderation(&self, prompt: &Prompt, review: Option<&Review>) -> PromptResult<()> {
        let mut state = self.state();
        let stored = state
            .prompts
            .get_mut(&prompt.prompt_id)
            .ok_or(PromptError::PromptNotFound)?;
        stored.status = prompt.status;
        stored.updated_at = prompt.updated_at;
        if let Some(review) = review {
            state.reviews.push(review.clone());
        }
        Ok(())
    }

    async fn list_prompts(
        &self,
        filter: &PromptFilter,
        page: &PageRequest,
    ) -> PromptResult<Page<PromptView>> {
        let state = self.state();
        let mut matches: Vec<&Prompt> = state
            .prompts
            .values()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .filter(|p| filter.language_id.is_none_or(|l| p.language_id == l))
            .filter(|p| filter.author_id.is_none_or(|a| p.author_id == a))
            .collect();

        sort_newest(&mut matches);
        if filter.order == ListingOrder::Popular {
            matches.sort_by(|a, b| b.likes_count.cmp(&a.likes_count));
        }

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|p| state.view(p))
            .collect();

        Ok(Page::new(items, *page, total))
    }

    async fn list_prompts_by_author(&self, author_id: &UserId) -> PromptResult<Vec<PromptView>> {
        let state = self.state();
        let mut own: Vec<&Prompt> = state
            .prompts
            .values()
            .filter(|p| &p.author_id == author_id)
            .collect();
        sort_newest(&mut own);
        Ok(own.into_iter().map(|p| state.view(p)).collect())
    }

    async fn list_engaged_prompts(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
    ) -> PromptResult<Vec<PromptView>> {
        let state = self.state();
        let mut engaged: Vec<(u64, &Prompt)> = state
            .relations(kind)
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .filter_map(|((_, prompt_id), seq)| state.prompts.get(prompt_id).map(|p| (*seq, p)))
            .filter(|(_, p)| p.is_published() || p.is_authored_by(user_id))
            .collect();
        engaged.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(engaged.into_iter().map(|(_, p)| state.view(p)).collect())
    }

    async fn delete_prompt_cascade(&self, prompt_id: &PromptId) -> PromptResult<bool> {
        let mut state = self.state();
        if !state.prompts.contains_key(prompt_id) {
            return Ok(false);
        }
        state.likes.retain(|(_, p), _| p != prompt_id);
        state.favorites.retain(|(_, p), _| p != prompt_id);
        state.reviews.retain(|r| &r.prompt_id != prompt_id);
        state.prompts.remove(prompt_id);
        Ok(true)
    }

    async fn prompt_stats(&self, popular_threshold: i64) -> PromptResult<PromptStats> {
        let state = self.state();
        let published: Vec<&Prompt> = state.prompts.values().filter(|p| p.is_published()).collect();

        let mut per_language: HashMap<LanguageId, i64> = HashMap::new();
        for p in &published {
            *per_language.entry(p.language_id).or_default() += 1;
        }
        let mut language_stats: Vec<LanguageCount> = per_language
            .into_iter()
            .filter_map(|(id, count)| {
                state.languages.get(&id).map(|l| LanguageCount {
                    language: l.summary(),
                    count,
                })
            })
            .collect();
        language_stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.language.name.cmp(&b.language.name))
        });

        Ok(PromptStats {
            total_count: published.len() as i64,
            popular_count: published
                .iter()
                .filter(|p| p.likes_count >= popular_threshold)
                .count() as i64,
            language_stats,
        })
    }
}

impl EngagementRepository for InMemoryPromptRepository {
    async fn toggle_engagement(
        &self,
        user_id: &UserId,
        prompt_id: &PromptId,
        kind: EngagementKind,
    ) -> PromptResult<EngagementState> {
        let mut state = self.state();
        if !state.prompts.contains_key(prompt_id) {
            return Err(PromptError::PromptNotFound);
        }

        state.seq += 1;
        let seq = state.seq;
        let key = (*user_id, *prompt_id);
        let relations = state.relations_mut(kind);
        let active = if relations.remove(&key).is_some() {
            false
        } else {
            relations.insert(key, seq);
            true
        };

        let prompt = state
            .prompts
            .get_mut(prompt_id)
            .ok_or(PromptError::PromptNotFound)?;
        let counter = match kind {
            EngagementKind::Like => &mut prompt.likes_count,
            EngagementKind::Favorite => &mut prompt.favorites_count,
        };
        *counter = if active { *counter + 1 } else { (*counter - 1).max(0) };

        Ok(EngagementState {
            active,
            count: *counter,
        })
    }

    async fn engaged_prompt_ids(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
        prompt_ids: &[PromptId],
    ) -> PromptResult<HashSet<PromptId>> {
        let state = self.state();
        let relations = state.relations(kind);
        Ok(prompt_ids
            .iter()
            .filter(|id| relations.contains_key(&(*user_id, **id)))
            .copied()
            .collect())
    }

    async fn count_relations(
        &self,
        prompt_id: &PromptId,
        kind: EngagementKind,
    ) -> PromptResult<u64> {
        Ok(self
            .state()
            .relations(kind)
            .keys()
            .filter(|(_, p)| p == prompt_id)
            .count() as u64)
    }
}

impl ReviewRepository for InMemoryPromptRepository {
    async fn list_reviews(&self, prompt_id: &PromptId) -> PromptResult<Vec<Review>> {
        // Appended in order, so reversed is newest first
        Ok(self
            .state()
            .reviews
            .iter()
            .rev()
            .filter(|r| &r.prompt_id == prompt_id)
            .cloned()
            .collect())
    }
}

impl LanguageRepository for InMemoryPromptRepository {
    async fn create_language(&self, language: &Language) -> PromptResult<()> {
        let mut state = self.state();
        if state.languages.values().any(|l| l.slug == language.slug) {
            return Err(PromptError::SlugTaken);
        }
        state
            .languages
            .insert(language.language_id, language.clone());
        Ok(())
    }

    async fn find_language(&self, language_id: &LanguageId) -> PromptResult<Option<Language>> {
        Ok(self.state().languages.get(language_id).cloned())
    }

    async fn find_language_by_slug(&self, slug: &LanguageSlug) -> PromptResult<Option<Language>> {
        Ok(self
            .state()
            .languages
            .values()
            .find(|l| &l.slug == slug)
            .cloned())
    }

    async fn list_languages_with_counts(&self) -> PromptResult<Vec<LanguageWithCount>> {
        let state = self.state();
        let mut languages: Vec<LanguageWithCount> = state
            .languages
            .values()
            .map(|l| LanguageWithCount {
                language: l.clone(),
                prompts_count: state
                    .prompts
                    .values()
                    .filter(|p| p.language_id == l.language_id && p.is_published())
                    .count() as i64,
            })
            .collect();
        languages.sort_by(|a, b| {
            b.language
                .popularity
                .cmp(&a.language.popularity)
                .then_with(|| a.language.name.cmp(&b.language.name))
        });
        Ok(languages)
    }
}

impl MaintenanceRepository for InMemoryPromptRepository {
    async fn recount_engagement_counters(&self) -> PromptResult<u64> {
        let mut state = self.state();
        let mut likes: HashMap<PromptId, i64> = HashMap::new();
        let mut favorites: HashMap<PromptId, i64> = HashMap::new();
        for (_, prompt_id) in state.likes.keys() {
            *likes.entry(*prompt_id).or_default() += 1;
        }
        for (_, prompt_id) in state.favorites.keys() {
            *favorites.entry(*prompt_id).or_default() += 1;
        }

        for (id, prompt) in state.prompts.iter_mut() {
            prompt.likes_count = likes.get(id).copied().unwrap_or(0);
            prompt.favorites_count = favorites.get(id).copied().unwrap_or(0);
        }
        Ok(state.prompts.len() as u64)
    }

    async fn recompute_language_popularity(&self) -> PromptResult<u64> {
        let mut guard = self.state();
        let state = &mut *guard;
        for language in state.languages.values_mut() {
            language.popularity = state
                .prompts
                .values()
                .filter(|p| p.language_id == language.language_id)
                .filter(|p| p.status == PromptStatus::Published)
                .map(|p| 1 + p.likes_count)
                .sum();
        }
        Ok(state.languages.len() as u64)
    }
}
