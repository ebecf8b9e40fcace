//! Resume persistence. The store performs single-record operations only;
//! ownership rules live in `service`, which runs them before any mutation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumePatch, ResumeRow, ResumeSummary};

/// Storage backend for resumes. Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, new: NewResume) -> Result<ResumeRow>;

    /// Summaries of the user's resumes, most recently updated first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>>;

    /// Replaces the supplied fields and bumps `updated_at`.
    /// Returns `None` if the record no longer exists.
    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<ResumeRow>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, new: NewResume) -> Result<ResumeRow> {
        sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, resume_data, title)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, resume_data, title, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.resume_data)
        .bind(&new.title)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert resume")
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>> {
        sqlx::query_as::<_, ResumeSummary>(
            "SELECT id, title, created_at, updated_at FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list resumes")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>(
            "SELECT id, user_id, resume_data, title, created_at, updated_at FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get resume")
    }

    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<ResumeRow>> {
        // Single-statement write: concurrent updates serialize on the row lock
        // and the last one wins.
        sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET resume_data = COALESCE($2, resume_data),
                title = COALESCE($3, title),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, resume_data, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.resume_data)
        .bind(patch.title)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update resume")
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete resume")?;
        Ok(result.rows_affected() > 0)
    }
}
