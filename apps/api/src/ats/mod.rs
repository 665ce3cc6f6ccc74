// ATS analysis pipeline.
// Implements: section analysis, link validation, company verification,
// score aggregation, recommendations, and the per-request orchestration.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod companies;
pub mod handlers;
pub mod links;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod recommend;
pub mod scoring;
pub mod sections;

use thiserror::Error;

use crate::errors::AppError;
use crate::llm_client::LlmError;

/// Errors raised by individual analysis stages.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("analysis field '{field}' is out of range: {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Llm(inner) => inner.into(),
            out_of_range @ AnalysisError::ScoreOutOfRange { .. } => {
                AppError::MalformedAnalysis(out_of_range.to_string())
            }
        }
    }
}
