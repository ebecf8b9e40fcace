use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextModel;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works against it independently.
#[derive(Clone)]
pub struct AppState {
    /// Resume persistence. Postgres in production, in-memory without `DATABASE_URL`.
    pub resumes: Arc<dyn ResumeStore>,
    /// Generative model behind the analysis endpoints.
    pub llm: Arc<dyn TextModel>,
    pub config: Config,
}
