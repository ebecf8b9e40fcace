//! Resume operations with per-user isolation. Existence and ownership are
//! checked before any write; no partial writes occur.

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    is_empty_payload, NewResume, ResumePatch, ResumeRow, ResumeSummary, DEFAULT_TITLE,
    MAX_TITLE_CHARS,
};
use crate::resumes::store::ResumeStore;

pub async fn create_resume(
    store: &dyn ResumeStore,
    user_id: Uuid,
    resume_data: Option<Value>,
    title: Option<String>,
) -> Result<ResumeRow, AppError> {
    let resume_data = resume_data
        .filter(|v| !is_empty_payload(v))
        .ok_or_else(|| AppError::Validation("Resume data is required".to_string()))?;
    let title = match title.as_deref().map(trim_title).transpose()? {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TITLE.to_string(),
    };

    let row = store
        .insert(NewResume {
            user_id,
            resume_data,
            title,
        })
        .await?;

    info!("Created resume {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn list_resumes(
    store: &dyn ResumeStore,
    user_id: Uuid,
) -> Result<Vec<ResumeSummary>, AppError> {
    Ok(store.list_by_user(user_id).await?)
}

pub async fn get_resume(
    store: &dyn ResumeStore,
    user_id: Uuid,
    id: &str,
) -> Result<ResumeRow, AppError> {
    load_owned(store, user_id, id).await
}

pub async fn update_resume(
    store: &dyn ResumeStore,
    user_id: Uuid,
    id: &str,
    resume_data: Option<Value>,
    title: Option<String>,
) -> Result<ResumeRow, AppError> {
    let existing = load_owned(store, user_id, id).await?;

    let patch = ResumePatch {
        resume_data,
        title: title.as_deref().map(trim_title).transpose()?,
    };

    let row = store
        .update(existing.id, patch)
        .await?
        .ok_or_else(resume_not_found)?;

    info!("Updated resume {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn delete_resume(
    store: &dyn ResumeStore,
    user_id: Uuid,
    id: &str,
) -> Result<(), AppError> {
    let existing = load_owned(store, user_id, id).await?;

    if !store.delete(existing.id).await? {
        return Err(resume_not_found());
    }

    info!("Deleted resume {} for user {user_id}", existing.id);
    Ok(())
}

/// NotFound for unknown or malformed ids, Forbidden for someone else's resume.
async fn load_owned(
    store: &dyn ResumeStore,
    user_id: Uuid,
    id: &str,
) -> Result<ResumeRow, AppError> {
    let id = Uuid::parse_str(id).map_err(|_| resume_not_found())?;

    let row = store.find_by_id(id).await?.ok_or_else(resume_not_found)?;

    if !row.is_owned_by(user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

/// Trims the title. Longer than `MAX_TITLE_CHARS` is rejected rather than
/// truncated.
fn trim_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "Title cannot exceed {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}
