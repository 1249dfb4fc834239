//! PostgreSQL Repository Implementations

use std::collections::HashSet;

use auth::UserId;
use auth::models::email::Email;
use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::pagination::{Page, PageRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    AuthorSummary, EngagementState, Language, LanguageCount, LanguageSummary, LanguageWithCount,
    Prompt, PromptStats, PromptView, Review,
};
use crate::domain::repository::{
    EngagementRepository, LanguageRepository, MaintenanceRepository, PromptFilter,
    PromptRepository, ReviewRepository,
};
use crate::domain::value_objects::{
    EngagementKind, LanguageId, LanguageSlug, ListingOrder, PromptId, PromptStatus, PromptType,
    ReviewId, ReviewStatus,
};
use crate::error::{PromptError, PromptResult};

/// PostgreSQL-backed prompt repository
#[derive(Clone)]
pub struct PgPromptRepository {
    pool: PgPool,
}

impl PgPromptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PUBLISHED: i16 = PromptStatus::Published.id();

/// Prompt joined with author and language. Every query selecting views
/// appends its own WHERE / ORDER BY.
const VIEW_SELECT: &str = r#"
    SELECT
        p.prompt_id,
        p.title,
        p.content,
        p.prompt_type,
        p.status,
        p.language_id,
        p.author_id,
        p.likes_count,
        p.favorites_count,
        p.created_at,
        p.updated_at,
        u.display_name AS author_name,
        u.email AS author_email,
        u.image AS author_image,
        l.name AS language_name,
        l.slug AS language_slug
    FROM prompts p
    LEFT JOIN users u ON u.user_id = p.author_id
    LEFT JOIN languages l ON l.language_id = p.language_id
"#;

/// Nullable filter parameters: $1 status, $2 language, $3 author
const LIST_FILTER: &str = r#"
    WHERE ($1::smallint IS NULL OR p.status = $1)
      AND ($2::uuid IS NULL OR p.language_id = $2)
      AND ($3::uuid IS NULL OR p.author_id = $3)
"#;

// ============================================================================
// Prompt Repository Implementation
// ============================================================================

impl PromptRepository for PgPromptRepository {
    async fn create_prompt(&self, prompt: &Prompt) -> PromptResult<()> {
        sqlx::query(
            r#"
            INSERT INTO prompts (
                prompt_id,
                title,
                content,
                prompt_type,
                status,
                language_id,
                author_id,
                likes_count,
                favorites_count,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(prompt.prompt_id.as_uuid())
        .bind(&prompt.title)
        .bind(&prompt.content)
        .bind(prompt.prompt_type.id())
        .bind(prompt.status.id())
        .bind(prompt.language_id.as_uuid())
        .bind(prompt.author_id.as_uuid())
        .bind(prompt.likes_count)
        .bind(prompt.favorites_count)
        .bind(prompt.created_at)
        .bind(prompt.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_prompt(&self, prompt_id: &PromptId) -> PromptResult<Option<Prompt>> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            SELECT
                prompt_id,
                title,
                content,
                prompt_type,
                status,
                language_id,
                author_id,
                likes_count,
                favorites_count,
                created_at,
                updated_at
            FROM prompts
            WHERE prompt_id = $1
            "#,
        )
        .bind(prompt_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PromptRow::into_prompt).transpose()
    }

    async fn find_prompt_view(&self, prompt_id: &PromptId) -> PromptResult<Option<PromptView>> {
        let sql = format!("{VIEW_SELECT} WHERE p.prompt_id = $1");
        let row = sqlx::query_as::<_, PromptViewRow>(&sql)
            .bind(prompt_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PromptViewRow::into_view).transpose()
    }

    async fn update_prompt_content(&self, prompt: &Prompt) -> PromptResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE prompts SET
                title = $2,
                content = $3,
                language_id = $4,
                updated_at = $5
            WHERE prompt_id = $1
            "#,
        )
        .bind(prompt.prompt_id.as_uuid())
        .bind(&prompt.title)
        .bind(&prompt.content)
        .bind(prompt.language_id.as_uuid())
        .bind(prompt.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PromptError::PromptNotFound);
        }

        Ok(())
    }

    async fn save_moderation(&self, prompt: &Prompt, review: Option<&Review>) -> PromptResult<()> {
        let mut tx = self.pool.begin().await?;

        let result =
            sqlx::query("UPDATE prompts SET status = $2, updated_at = $3 WHERE prompt_id = $1")
                .bind(prompt.prompt_id.as_uuid())
                .bind(prompt.status.id())
                .bind(prompt.updated_at)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(PromptError::PromptNotFound);
        }

        if let Some(review) = review {
            sqlx::query(
                r#"
                INSERT INTO prompt_reviews (
                    review_id,
                    prompt_id,
                    reviewer_id,
                    status,
                    comment,
                    created_at
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(review.review_id.as_uuid())
            .bind(review.prompt_id.as_uuid())
            .bind(review.reviewer_id.as_uuid())
            .bind(review.status.id())
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_prompts(
        &self,
        filter: &PromptFilter,
        page: &PageRequest,
    ) -> PromptResult<Page<PromptView>> {
        let status = filter.status.map(|s| s.id());
        let language_id = filter.language_id.map(|id| id.into_uuid());
        let author_id = filter.author_id.map(|id| id.into_uuid());

        let count_sql = format!("SELECT COUNT(*) FROM prompts p {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(status)
            .bind(language_id)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            r#"
            {VIEW_SELECT}
            {LIST_FILTER}
            ORDER BY
                CASE WHEN $4 THEN p.likes_count ELSE 0 END DESC,
                p.created_at DESC,
                p.prompt_id DESC
            LIMIT $5 OFFSET $6
            "#
        );
        let rows = sqlx::query_as::<_, PromptViewRow>(&list_sql)
            .bind(status)
            .bind(language_id)
            .bind(author_id)
            .bind(filter.order == ListingOrder::Popular)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(PromptViewRow::into_view)
            .collect::<PromptResult<Vec<_>>>()?;

        Ok(Page::new(items, *page, total.max(0) as u64))
    }

    async fn list_prompts_by_author(&self, author_id: &UserId) -> PromptResult<Vec<PromptView>> {
        let sql = format!(
            "{VIEW_SELECT} WHERE p.author_id = $1 ORDER BY p.created_at DESC, p.prompt_id DESC"
        );
        let rows = sqlx::query_as::<_, PromptViewRow>(&sql)
            .bind(author_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PromptViewRow::into_view).collect()
    }

    async fn list_engaged_prompts(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
    ) -> PromptResult<Vec<PromptView>> {
        let sql = format!(
            r#"
            {VIEW_SELECT}
            JOIN {table} r ON r.prompt_id = p.prompt_id
            WHERE r.user_id = $1
              AND (p.status = $2 OR p.author_id = $1)
            ORDER BY r.created_at DESC
            "#,
            table = kind.table(),
        );
        let rows = sqlx::query_as::<_, PromptViewRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(PUBLISHED)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PromptViewRow::into_view).collect()
    }

    async fn delete_prompt_cascade(&self, prompt_id: &PromptId) -> PromptResult<bool> {
        let mut tx = self.pool.begin().await?;

        let likes = sqlx::query("DELETE FROM prompt_likes WHERE prompt_id = $1")
            .bind(prompt_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let favorites = sqlx::query("DELETE FROM prompt_favorites WHERE prompt_id = $1")
            .bind(prompt_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let reviews = sqlx::query("DELETE FROM prompt_reviews WHERE prompt_id = $1")
            .bind(prompt_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM prompts WHERE prompt_id = $1")
            .bind(prompt_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        tracing::debug!(
            prompt_id = %prompt_id,
            likes,
            favorites,
            reviews,
            "Prompt relations removed"
        );

        Ok(true)
    }

    async fn prompt_stats(&self, popular_threshold: i64) -> PromptResult<PromptStats> {
        let (total_count, popular_count) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE likes_count >= $2)
            FROM prompts
            WHERE status = $1
            "#,
        )
        .bind(PUBLISHED)
        .bind(popular_threshold)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, LanguageCountRow>(
            r#"
            SELECT
                l.language_id,
                l.name,
                l.slug,
                COUNT(p.prompt_id) AS count
            FROM languages l
            JOIN prompts p ON p.language_id = l.language_id AND p.status = $1
            GROUP BY l.language_id, l.name, l.slug
            ORDER BY count DESC, l.name ASC
            "#,
        )
        .bind(PUBLISHED)
        .fetch_all(&self.pool)
        .await?;

        Ok(PromptStats {
            total_count,
            popular_count,
            language_stats: rows.into_iter().map(LanguageCountRow::into_count).collect(),
        })
    }
}

// ============================================================================
// Engagement Repository Implementation
// ============================================================================

impl EngagementRepository for PgPromptRepository {
    async fn toggle_engagement(
        &self,
        user_id: &UserId,
        prompt_id: &PromptId,
        kind: EngagementKind,
    ) -> PromptResult<EngagementState> {
        // One statement: remove the relation if present, otherwise add it,
        // and move the counter by the rows actually deleted or inserted.
        // Two racing adds both reach the INSERT; the primary key plus
        // `ON CONFLICT DO NOTHING` makes the loser insert zero rows, so its
        // counter delta is zero and the counter keeps matching the relation
        // count.
        let sql = format!(
            r#"
            WITH removed AS (
                DELETE FROM {table}
                WHERE user_id = $1 AND prompt_id = $2
                RETURNING 1
            ),
            added AS (
                INSERT INTO {table} (user_id, prompt_id, created_at)
                SELECT $1, $2, NOW()
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (user_id, prompt_id) DO NOTHING
                RETURNING 1
            )
            UPDATE prompts SET
                {counter} = GREATEST(
                    {counter}
                        + (SELECT COUNT(*) FROM added)
                        - (SELECT COUNT(*) FROM removed),
                    0
                )
            WHERE prompt_id = $2
            RETURNING
                NOT EXISTS (SELECT 1 FROM removed) AS active,
                {counter} AS count
            "#,
            table = kind.table(),
            counter = kind.counter_column(),
        );

        let row = sqlx::query_as::<_, (bool, i64)>(&sql)
            .bind(user_id.as_uuid())
            .bind(prompt_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        let (active, count) = row.ok_or(PromptError::PromptNotFound)?;
        Ok(EngagementState { active, count })
    }

    async fn engaged_prompt_ids(
        &self,
        user_id: &UserId,
        kind: EngagementKind,
        prompt_ids: &[PromptId],
    ) -> PromptResult<HashSet<PromptId>> {
        if prompt_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<Uuid> = prompt_ids.iter().map(|id| id.into_uuid()).collect();
        let sql = format!(
            "SELECT prompt_id FROM {} WHERE user_id = $1 AND prompt_id = ANY($2)",
            kind.table()
        );
        let rows = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(user_id.as_uuid())
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PromptId::from_uuid).collect())
    }

    async fn count_relations(
        &self,
        prompt_id: &PromptId,
        kind: EngagementKind,
    ) -> PromptResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE prompt_id = $1", kind.table());
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(prompt_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgPromptRepository {
    async fn list_reviews(&self, prompt_id: &PromptId) -> PromptResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT
                review_id,
                prompt_id,
                reviewer_id,
                status,
                comment,
                created_at
            FROM prompt_reviews
            WHERE prompt_id = $1
            ORDER BY created_at DESC, review_id DESC
            "#,
        )
        .bind(prompt_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_review).collect()
    }
}

// ============================================================================
// Language Repository Implementation
// ============================================================================

const LANGUAGE_COLUMNS: &str = r#"
    language_id,
    name,
    name_localized,
    slug,
    popularity,
    created_at
"#;

impl LanguageRepository for PgPromptRepository {
    async fn create_language(&self, language: &Language) -> PromptResult<()> {
        sqlx::query(
            r#"
            INSERT INTO languages (
                language_id,
                name,
                name_localized,
                slug,
                popularity,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(language.language_id.as_uuid())
        .bind(&language.name)
        .bind(&language.name_localized)
        .bind(language.slug.as_str())
        .bind(language.popularity)
        .bind(language.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PromptError::SlugTaken
            } else {
                PromptError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_language(&self, language_id: &LanguageId) -> PromptResult<Option<Language>> {
        let sql = format!("SELECT {LANGUAGE_COLUMNS} FROM languages WHERE language_id = $1");
        let row = sqlx::query_as::<_, LanguageRow>(&sql)
            .bind(language_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(LanguageRow::into_language))
    }

    async fn find_language_by_slug(&self, slug: &LanguageSlug) -> PromptResult<Option<Language>> {
        let sql = format!("SELECT {LANGUAGE_COLUMNS} FROM languages WHERE slug = $1");
        let row = sqlx::query_as::<_, LanguageRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(LanguageRow::into_language))
    }

    async fn list_languages_with_counts(&self) -> PromptResult<Vec<LanguageWithCount>> {
        let rows = sqlx::query_as::<_, LanguageWithCountRow>(
            r#"
            SELECT
                l.language_id,
                l.name,
                l.name_localized,
                l.slug,
                l.popularity,
                l.created_at,
                COUNT(p.prompt_id) AS prompts_count
            FROM languages l
            LEFT JOIN prompts p ON p.language_id = l.language_id AND p.status = $1
            GROUP BY l.language_id
            ORDER BY l.popularity DESC, l.name ASC
            "#,
        )
        .bind(PUBLISHED)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LanguageWithCount {
                prompts_count: r.prompts_count,
                language: r.language.into_language(),
            })
            .collect())
    }
}

// ============================================================================
// Maintenance Repository Implementation
// ============================================================================

impl MaintenanceRepository for PgPromptRepository {
    async fn recount_engagement_counters(&self) -> PromptResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE prompts p SET
                likes_count = (
                    SELECT COUNT(*) FROM prompt_likes r WHERE r.prompt_id = p.prompt_id
                ),
                favorites_count = (
                    SELECT COUNT(*) FROM prompt_favorites r WHERE r.prompt_id = p.prompt_id
                )
            "#,
        )
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn recompute_language_popularity(&self) -> PromptResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE languages l SET
                popularity = (
                    SELECT (COUNT(*) + COALESCE(SUM(p.likes_count), 0))::bigint
                    FROM prompts p
                    WHERE p.language_id = l.language_id AND p.status = $1
                )
            "#,
        )
        .bind(PUBLISHED)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn prompt_status(id: i16, prompt_id: Uuid) -> PromptResult<PromptStatus> {
    PromptStatus::from_id(id)
        .ok_or_else(|| PromptError::Internal(format!("Invalid status {id} for prompt {prompt_id}")))
}

fn prompt_type(id: i16, prompt_id: Uuid) -> PromptResult<PromptType> {
    PromptType::from_id(id).ok_or_else(|| {
        PromptError::Internal(format!("Invalid prompt_type {id} for prompt {prompt_id}"))
    })
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    prompt_id: Uuid,
    title: String,
    content: String,
    prompt_type: i16,
    status: i16,
    language_id: Uuid,
    author_id: Uuid,
    likes_count: i64,
    favorites_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PromptRow {
    fn into_prompt(self) -> PromptResult<Prompt> {
        Ok(Prompt {
            prompt_id: PromptId::from_uuid(self.prompt_id),
            title: self.title,
            content: self.content,
            prompt_type: prompt_type(self.prompt_type, self.prompt_id)?,
            status: prompt_status(self.status, self.prompt_id)?,
            language_id: LanguageId::from_uuid(self.language_id),
            author_id: UserId::from_uuid(self.author_id),
            likes_count: self.likes_count,
            favorites_count: self.favorites_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PromptViewRow {
    #[sqlx(flatten)]
    prompt: PromptRow,
    author_name: Option<String>,
    author_email: Option<String>,
    author_image: Option<String>,
    language_name: Option<String>,
    language_slug: Option<String>,
}

impl PromptViewRow {
    fn into_view(self) -> PromptResult<PromptView> {
        let prompt = self.prompt.into_prompt()?;

        let author = match (self.author_name, self.author_email) {
            (Some(name), Some(email)) => {
                let avatar_url = self
                    .author_image
                    .unwrap_or_else(|| Email::from_db(email).fallback_avatar_url());
                Some(AuthorSummary {
                    id: prompt.author_id,
                    name,
                    avatar_url,
                })
            }
            _ => None,
        };

        let language = match (self.language_name, self.language_slug) {
            (Some(name), Some(slug)) => Some(LanguageSummary {
                id: prompt.language_id,
                name,
                slug,
            }),
            _ => None,
        };

        Ok(PromptView {
            prompt,
            author,
            language,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    prompt_id: Uuid,
    reviewer_id: Uuid,
    status: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> PromptResult<Review> {
        let status = ReviewStatus::from_id(self.status).ok_or_else(|| {
            PromptError::Internal(format!(
                "Invalid review status {} for review {}",
                self.status, self.review_id
            ))
        })?;

        Ok(Review {
            review_id: ReviewId::from_uuid(self.review_id),
            prompt_id: PromptId::from_uuid(self.prompt_id),
            reviewer_id: UserId::from_uuid(self.reviewer_id),
            status,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LanguageRow {
    language_id: Uuid,
    name: String,
    name_localized: String,
    slug: String,
    popularity: i64,
    created_at: DateTime<Utc>,
}

impl LanguageRow {
    fn into_language(self) -> Language {
        Language {
            language_id: LanguageId::from_uuid(self.language_id),
            name: self.name,
            name_localized: self.name_localized,
            slug: LanguageSlug::from_db(self.slug),
            popularity: self.popularity,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LanguageWithCountRow {
    #[sqlx(flatten)]
    language: LanguageRow,
    prompts_count: i64,
}

#[derive(sqlx::FromRow)]
struct LanguageCountRow {
    language_id: Uuid,
    name: String,
    slug: String,
    count: i64,
}

impl LanguageCountRow {
    fn into_count(self) -> LanguageCount {
        LanguageCount {
            language: LanguageSummary {
                id: LanguageId::from_uuid(self.language_id),
                name: self.name,
                slug: self.slug,
            },
            count: self.count,
        }
    }
}

/// Runs against a live database when `DATABASE_URL` is set; skipped otherwise
#[cfg(test)]
mod pg_tests {
    use std::sync::Arc;

    use sqlx::postgres::PgPoolOptions;
    use tokio::task::JoinSet;

    use super::*;

    async fn repo() -> Option<Arc<PgPromptRepository>> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        Some(Arc::new(PgPromptRepository::new(pool)))
    }

    async fn insert_user(repo: &PgPromptRepository) -> UserId {
        let user_id = UserId::new();
        sqlx::query("INSERT INTO users (user_id, email, display_name) VALUES ($1, $2, $3)")
            .bind(user_id.as_uuid())
            .bind(format!("{user_id}@example.com"))
            .bind("Fan")
            .execute(&repo.pool)
            .await
            .unwrap();
        user_id
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_keep_counter_in_step() {
        let Some(repo) = repo().await else {
            return;
        };

        let author = insert_user(&repo).await;
        let slug = format!("lang-{}", UserId::new().as_uuid().simple());
        let language = Language::new(
            slug.clone(),
            slug.clone(),
            LanguageSlug::new(&slug).unwrap(),
        );
        repo.create_language(&language).await.unwrap();
        let prompt = Prompt::new(
            author,
            "Concurrent".to_string(),
            "content".to_string(),
            language.language_id,
            PromptType::Prompt,
        );
        repo.create_prompt(&prompt).await.unwrap();
        let prompt_id = prompt.prompt_id;

        // Same pair, many racing toggles
        let fan = insert_user(&repo).await;
        let mut tasks = JoinSet::new();
        for _ in 0..16 {
            let repo = repo.clone();
            tasks.spawn(async move {
                repo.toggle_engagement(&fan, &prompt_id, EngagementKind::Like)
                    .await
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let relations = repo
            .count_relations(&prompt_id, EngagementKind::Like)
            .await
            .unwrap();
        let stored = repo.find_prompt(&prompt_id).await.unwrap().unwrap();
        assert!(relations <= 1);
        assert_eq!(stored.likes_count, relations as i64);
    }
}
