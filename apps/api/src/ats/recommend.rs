//! Recommendation generation — the final, optional stage of the pipeline.
//!
//! Runs after the score is already computed, so a failure here degrades the
//! report (empty recommendation list) instead of aborting the request.

use tracing::warn;

use crate::ats::models::{AnalysisBundle, Recommendation, RecommendationList};
use crate::ats::prompts::{RECOMMENDATION_PROMPT_TEMPLATE, SECTION_SYSTEM};
use crate::llm_client::LlmClient;

pub async fn generate_recommendations(
    llm: &LlmClient,
    bundle: &AnalysisBundle,
    ats_score: u32,
) -> Vec<Recommendation> {
    let analysis_json = match serde_json::to_string(bundle) {
        Ok(json) => json,
        Err(e) => {
            warn!("could not serialize analysis bundle for recommendations: {e}");
            return vec![];
        }
    };

    let prompt = RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{ats_score}", &ats_score.to_string())
        .replace("{analysis_json}", &analysis_json);

    match llm.call_json::<RecommendationList>(&prompt, SECTION_SYSTEM).await {
        Ok(list) => list.recommendations,
        Err(e) => {
            warn!("recommendation generation failed, returning score without suggestions: {e}");
            vec![]
        }
    }
}
