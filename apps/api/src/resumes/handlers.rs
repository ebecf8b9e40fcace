//! Axum route handlers for the Resume API. Every handler takes `AuthUser`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::resume::{
    CreateResumeRequest, ResumeSummary, ResumeView, UpdateResumeRequest,
};
use crate::resumes::service;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeMutationResponse {
    pub message: &'static str,
    pub resume: ResumeView,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeView,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeSummary>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeMutationResponse>), AppError> {
    let row = service::create_resume(
        state.resumes.as_ref(),
        user.user_id,
        request.resume_data,
        request.title,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ResumeMutationResponse {
            message: "Resume created successfully",
            resume: row.into(),
        }),
    ))
}

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = service::list_resumes(state.resumes.as_ref(), user.user_id).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let row = service::get_resume(state.resumes.as_ref(), user.user_id, &id).await?;
    Ok(Json(ResumeResponse {
        resume: row.into(),
    }))
}

/// PUT /api/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateResumeRequest>,
) -> Result<Json<ResumeMutationResponse>, AppError> {
    let row = service::update_resume(
        state.resumes.as_ref(),
        user.user_id,
        &id,
        request.resume_data,
        request.title,
    )
    .await?;

    Ok(Json(ResumeMutationResponse {
        message: "Resume updated successfully",
        resume: row.into(),
    }))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    service::delete_resume(state.resumes.as_ref(), user.user_id, &id).await?;
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully",
    }))
}
