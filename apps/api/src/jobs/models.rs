//! Request/response shapes for the job-search pipeline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub work_mode: String,
    #[serde(default)]
    pub location: String,
}

/// LLM-refined search input. Falls back to a deterministic refinement when
/// the model reply cannot be parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedQuery {
    pub optimized_job_title: String,
    #[serde(default)]
    pub alternative_job_titles: Vec<String>,
    #[serde(default)]
    pub work_mode: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub search_keywords: Vec<String>,
}

/// One normalized job posting, regardless of which provider produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: String,
    pub work_mode: String,
    pub url: String,
    /// RFC 3339 timestamp of when the posting went up (provider-supplied or
    /// the fetch time when the provider omits it).
    pub posted_date: String,
    #[serde(default)]
    pub relevance_score: u32,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub job_title: String,
    pub work_mode: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub jobs: Vec<JobPosting>,
    pub search_criteria: SearchCriteria,
    pub total_results: usize,
}
