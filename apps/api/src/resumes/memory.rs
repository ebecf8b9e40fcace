use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumePatch, ResumeRow, ResumeSummary};
use crate::resumes::store::ResumeStore;

/// Process-local store for development without PostgreSQL, and for tests.
/// Each operation holds the lock once, so writes are whole-record and
/// concurrent updates resolve last-writer-wins.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<HashMap<Uuid, ResumeRow>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn insert(&self, new: NewResume) -> Result<ResumeRow> {
        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            resume_data: new.resume_data,
            title: new.title,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>> {
        let records = self.records.read().await;
        let mut summaries: Vec<ResumeSummary> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .map(ResumeSummary::from)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<ResumeRow>> {
        let mut records = self.records.write().await;
        let Some(row) = records.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(data) = patch.resume_data {
            row.resume_data = data;
        }
        if let Some(title) = patch.title {
            row.title = title;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
