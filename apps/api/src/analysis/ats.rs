//! ATS scoring: asks the model how well a resume matches a job description.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{info, warn};

use crate::analysis::normalize::{parse_model_output, present, ModelSchema};
use crate::analysis::prompts::ATS_SCORE_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::render_json_prompt;
use crate::llm_client::TextModel;

/// Score schema the model must return. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    /// Kept as the model wrote it (`80` stays an integer).
    pub score: Number,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<String>,
}

impl ModelSchema for AtsScore {
    fn check(&self) -> Result<(), String> {
        match self.score.as_f64() {
            Some(s) if (0.0..=100.0).contains(&s) => Ok(()),
            _ => Err(format!("score must be within 0-100, got {}", self.score)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreResponse {
    pub ats_score: Number,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub notes: String,
    pub analysis_complete: bool,
}

impl From<AtsScore> for AtsScoreResponse {
    fn from(score: AtsScore) -> Self {
        Self {
            ats_score: score.score,
            missing_keywords: score.missing_keywords,
            suggestions: score.suggestions,
            notes: score.notes.unwrap_or_default(),
            analysis_complete: true,
        }
    }
}

pub fn build_ats_prompt(resume_data: &Value, job_description: &str) -> anyhow::Result<String> {
    let resume_json =
        serde_json::to_string_pretty(resume_data).context("Failed to serialize resume data")?;
    Ok(render_json_prompt(
        ATS_SCORE_PROMPT,
        &[
            ("resume_data", resume_json.as_str()),
            ("job_description", job_description),
        ],
    ))
}

/// Scores a resume payload against a job description. One model call, no retry.
pub async fn score_resume(
    model: &dyn TextModel,
    resume_data: &Value,
    job_description: &str,
) -> Result<AtsScoreResponse, AppError> {
    let prompt = build_ats_prompt(resume_data, job_description)?;

    let raw = model
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("ATS scoring failed: {e}")))?;

    let score = parse_model_output::<AtsScore>(&raw).map_err(|e| {
        warn!("ATS score response rejected ({e}); raw text: {raw}");
        AppError::UpstreamFormat(e.to_string())
    })?;

    info!("ATS analysis complete: score={}", score.score);
    Ok(score.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::CannedModel;
    use serde_json::json;

    fn resume() -> Value {
        json!({ "skills": ["Rust", "PostgreSQL"], "experience": ["Built a billing service"] })
    }

    #[tokio::test]
    async fn test_fenced_response_yields_normalized_result() {
        let model = CannedModel::replying(
            "```json\n{\"score\":80,\"missingKeywords\":[],\"suggestions\":[]}\n```",
        );
        let result = score_resume(&model, &resume(), "Rust engineer").await.unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "atsScore": 80,
                "missingKeywords": [],
                "suggestions": [],
                "notes": "",
                "analysisComplete": true
            })
        );
    }

    #[tokio::test]
    async fn test_non_json_response_is_upstream_format_error() {
        let model = CannedModel::replying("I cannot comply");
        let err = score_resume(&model, &resume(), "Rust engineer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UpstreamFormat(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_rejected() {
        for raw in [
            r#"{"score":101,"missingKeywords":[],"suggestions":[]}"#,
            r#"{"score":-1,"missingKeywords":[],"suggestions":[]}"#,
        ] {
            let err = score_resume(&CannedModel::replying(raw), &resume(), "jd")
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::UpstreamFormat(_)), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_rejected_not_defaulted() {
        for raw in [
            r#"{"score":"80","missingKeywords":[],"suggestions":[]}"#,
            r#"{"score":80,"suggestions":[]}"#,
            r#"{"score":80,"missingKeywords":[1,2],"suggestions":[]}"#,
            r#"{"score":80,"missingKeywords":[],"suggestions":[],"notes":7}"#,
            r#"{"score":80,"missingKeywords":[],"suggestions":[],"notes":null}"#,
            r#"{"score":null,"missingKeywords":[],"suggestions":[]}"#,
        ] {
            let err = score_resume(&CannedModel::replying(raw), &resume(), "jd")
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::UpstreamFormat(_)), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_array_shaped_response_is_not_a_score() {
        for raw in ["[80,[],[]]", "```json\n[80,[],[],\"ok\"]\n```", "80"] {
            let err = score_resume(&CannedModel::replying(raw), &resume(), "jd")
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::UpstreamFormat(_)), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_fractional_score_and_notes_pass_through() {
        let raw = r#"{"score":72.5,"missingKeywords":["Kafka"],"suggestions":["Add metrics"],"notes":"Solid","extra":true}"#;
        let result = score_resume(&CannedModel::replying(raw), &resume(), "jd")
            .await
            .unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["atsScore"], json!(72.5));
        assert_eq!(value["missingKeywords"], json!(["Kafka"]));
        assert_eq!(value["notes"], "Solid");
        assert!(value.get("extra").is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_llm_error() {
        let err = score_resume(&CannedModel::failing(503), &resume(), "jd")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_prompt_embeds_both_inputs() {
        let model = CannedModel::replying(r#"{"score":1,"missingKeywords":[],"suggestions":[]}"#);
        score_resume(&model, &resume(), "Senior Rust Engineer, Kafka a plus")
            .await
            .unwrap();
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("\"PostgreSQL\""));
        assert!(prompt.contains("Senior Rust Engineer, Kafka a plus"));
        assert!(prompt.trim_end().ends_with("Return ONLY valid JSON, no additional text."));
    }
}
