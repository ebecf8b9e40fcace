//! Auto-structure: turns a free-text career description into resume sections.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::normalize::{parse_model_output, present, ModelSchema};
use crate::analysis::prompts::AUTO_STRUCTURE_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::render_json_prompt;
use crate::llm_client::TextModel;

/// Extraction schema the model must return.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedSections {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "present")]
    pub education: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub projects: Option<Vec<String>>,
}

impl ModelSchema for ExtractedSections {}

/// Sections as returned to clients: optional lists are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredData {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub projects: Vec<String>,
}

impl From<ExtractedSections> for StructuredData {
    fn from(sections: ExtractedSections) -> Self {
        Self {
            summary: sections.summary,
            skills: sections.skills,
            experience: sections.experience,
            education: sections.education.unwrap_or_default(),
            projects: sections.projects.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoStructureResponse {
    pub structured_data: StructuredData,
    pub extraction_complete: bool,
}

/// Extracts resume sections from free text. One model call, no retry.
pub async fn extract_sections(
    model: &dyn TextModel,
    text: &str,
) -> Result<AutoStructureResponse, AppError> {
    let prompt = render_json_prompt(AUTO_STRUCTURE_PROMPT, &[("text", text)]);

    let raw = model
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Text structuring failed: {e}")))?;

    let sections = parse_model_output::<ExtractedSections>(&raw).map_err(|e| {
        warn!("Auto-structure response rejected ({e}); raw text: {raw}");
        AppError::UpstreamFormat(e.to_string())
    })?;

    info!(
        "Auto-structure complete: {} skills, {} experience bullets",
        sections.skills.len(),
        sections.experience.len()
    );

    Ok(AutoStructureResponse {
        structured_data: sections.into(),
        extraction_complete: true,
    })
}
