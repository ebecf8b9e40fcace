use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled Resume";
pub const MAX_TITLE_CHARS: usize = 100;

/// A payload counts as supplied unless it is `null`, `false`, zero or `""`.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A stored resume. `resume_data` is opaque: the server never interprets it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_data: Value,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// List projection. Has no payload field, so list responses cannot leak one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeRow> for ResumeSummary {
    fn from(row: &ResumeRow) -> Self {
        Self {
            id: row.id,
            title: row.title.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full record as returned to the owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    pub id: Uuid,
    pub title: String,
    pub resume_data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeView {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            resume_data: row.resume_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated input for a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub resume_data: Value,
    pub title: String,
}

/// Fields to replace on update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ResumePatch {
    pub resume_data: Option<Value>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub resume_data: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub resume_data: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}
