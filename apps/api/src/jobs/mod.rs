// Job search pipeline.
// Three fixed stages: query refinement (LLM with deterministic fallback),
// provider fan-out over the RapidAPI job boards, and relevance re-ranking
// (LLM with a pure fallback scorer).

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod rank;

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::models::{
    JobPosting, RefinedQuery, SearchCriteria, SearchRequest, SearchResponse,
};
use crate::jobs::prompts::{JOBS_SYSTEM, RANK_PROMPT_TEMPLATE, REFINE_PROMPT_TEMPLATE};
use crate::llm_client::LlmClient;
use crate::state::AppState;

pub async fn run_search(
    state: &AppState,
    request: &SearchRequest,
) -> Result<SearchResponse, AppError> {
    let refined = refine_query(&state.llm, request).await;
    info!(
        "refined query: '{}' in {}, {}",
        refined.optimized_job_title, refined.city, refined.country
    );

    let location = format!("{}, {}", refined.city, refined.country);
    let jobs = providers::search_providers(
        &state.http,
        &state.config.rapidapi_key,
        &refined.optimized_job_title,
        &location,
        &request.work_mode,
        Utc::now(),
    )
    .await;

    let criteria = SearchCriteria {
        job_title: request.job_title.clone(),
        work_mode: request.work_mode.clone(),
        location: request.location.clone(),
    };

    if jobs.is_empty() {
        info!("no jobs found for '{}' in {}", request.job_title, location);
        return Ok(SearchResponse {
            success: false,
            message: Some(format!("No such jobs found in {}.", request.location)),
            jobs: vec![],
            search_criteria: criteria,
            total_results: 0,
        });
    }

    let ranked = optimize_results(&state.llm, jobs, request).await;

    Ok(SearchResponse {
        success: true,
        message: None,
        total_results: ranked.len(),
        jobs: ranked,
        search_criteria: criteria,
    })
}

/// LLM-backed query refinement. A malformed reply degrades to the
/// deterministic refinement instead of failing the search.
async fn refine_query(llm: &LlmClient, request: &SearchRequest) -> RefinedQuery {
    let prompt = REFINE_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{work_mode}", &request.work_mode)
        .replace("{location}", &request.location);

    match llm.call_json::<RefinedQuery>(&prompt, JOBS_SYSTEM).await {
        Ok(refined) => refined,
        Err(e) => {
            warn!("query refinement failed, using heuristic fallback: {e}");
            heuristic_refinement(request)
        }
    }
}

fn heuristic_refinement(request: &SearchRequest) -> RefinedQuery {
    let mut parts = request.location.splitn(2, ',');
    let city = parts.next().unwrap_or_default().trim().to_string();
    let country = parts
        .next()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    RefinedQuery {
        optimized_job_title: request.job_title.clone(),
        alternative_job_titles: vec![request.job_title.clone()],
        work_mode: request.work_mode.clone(),
        city,
        country,
        search_keywords: vec![request.job_title.to_lowercase()],
    }
}

/// LLM re-ranking over the first few postings; falls back to the pure scorer
/// when the model reply is unusable.
async fn optimize_results(
    llm: &LlmClient,
    jobs: Vec<JobPosting>,
    request: &SearchRequest,
) -> Vec<JobPosting> {
    let sample = &jobs[..jobs.len().min(8)];
    let listings_json = match serde_json::to_string_pretty(sample) {
        Ok(json) => json,
        Err(e) => {
            warn!("could not serialize job listings for ranking: {e}");
            return rank::fallback_rank(jobs, request, Utc::now());
        }
    };

    let prompt = RANK_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{work_mode}", &request.work_mode)
        .replace("{location}", &request.location)
        .replace("{job_listings}", &listings_json);

    match llm.call_json::<Vec<JobPosting>>(&prompt, JOBS_SYSTEM).await {
        Ok(ranked) if !ranked.is_empty() => ranked,
        Ok(_) => {
            warn!("LLM ranking returned no jobs, using fallback scorer");
            rank::fallback_rank(jobs, request, Utc::now())
        }
        Err(e) => {
            warn!("LLM ranking failed, using fallback scorer: {e}");
            rank::fallback_rank(jobs, request, Utc::now())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_refinement_splits_location() {
        let refined = heuristic_refinement(&SearchRequest {
            job_title: "Data Scientist".to_string(),
            work_mode: "Hybrid".to_string(),
            location: "Toronto, Canada".to_string(),
        });
        assert_eq!(refined.city, "Toronto");
        assert_eq!(refined.country, "Canada");
        assert_eq!(refined.search_keywords, vec!["data scientist"]);
    }

    #[test]
    fn test_heuristic_refinement_without_country() {
        let refined = heuristic_refinement(&SearchRequest {
            job_title: "PM".to_string(),
            work_mode: "Remote".to_string(),
            location: "Singapore".to_string(),
        });
        assert_eq!(refined.city, "Singapore");
        assert_eq!(refined.country, "Unknown");
    }
}
