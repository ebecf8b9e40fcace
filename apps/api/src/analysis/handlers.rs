//! Axum route handlers for the AI analysis endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::ats::{score_resume, AtsScoreResponse};
use crate::analysis::structure::{extract_sections, AutoStructureResponse};
use crate::errors::{AppError, AppJson};
use crate::models::resume::is_empty_payload;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    #[serde(default)]
    pub resume_data: Option<Value>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutoStructureRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// POST /api/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<AtsScoreRequest>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let resume_data = request.resume_data.filter(|v| !is_empty_payload(v));
    let job_description = request.job_description.filter(|jd| !jd.is_empty());

    let (Some(resume_data), Some(job_description)) = (resume_data, job_description) else {
        return Err(AppError::Validation(
            "Resume data and job description are required".to_string(),
        ));
    };

    let result = score_resume(state.llm.as_ref(), &resume_data, &job_description).await?;
    Ok(Json(result))
}

/// POST /api/auto-structure
pub async fn handle_auto_structure(
    State(state): State<AppState>,
    AppJson(request): AppJson<AutoStructureRequest>,
) -> Result<Json<AutoStructureResponse>, AppError> {
    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Text input is required".to_string()))?;

    let result = extract_sections(state.llm.as_ref(), &text).await?;
    Ok(Json(result))
}
