use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::jobs::models::{SearchRequest, SearchResponse};
use crate::jobs::run_search;
use crate::state::AppState;

/// POST /api/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if request.job_title.trim().is_empty()
        || request.work_mode.trim().is_empty()
        || request.location.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Missing required fields: jobTitle, workMode, and location are required".to_string(),
        ));
    }

    let response = run_search(&state, &request).await?;
    Ok(Json(response))
}

/// GET /api/jobs/locations
pub async fn handle_locations() -> Json<Value> {
    Json(json!({ "locations": SUPPORTED_LOCATIONS }))
}

/// GET /api/jobs/titles
pub async fn handle_job_titles() -> Json<Value> {
    Json(json!({ "jobTitles": POPULAR_JOB_TITLES }))
}

const SUPPORTED_LOCATIONS: &[&str] = &[
    "Amsterdam, Netherlands",
    "Atlanta, USA",
    "Austin, USA",
    "Bangalore, India",
    "Barcelona, Spain",
    "Berlin, Germany",
    "Boston, USA",
    "Cairo, Egypt",
    "Chicago, USA",
    "Dallas, USA",
    "Delhi, India",
    "Dubai, UAE",
    "Dublin, Ireland",
    "Frankfurt, Germany",
    "Hong Kong, China",
    "Houston, USA",
    "Istanbul, Turkey",
    "London, UK",
    "Los Angeles, USA",
    "Madrid, Spain",
    "Melbourne, Australia",
    "Miami, USA",
    "Milan, Italy",
    "Mumbai, India",
    "Munich, Germany",
    "New York, USA",
    "Paris, France",
    "Philadelphia, USA",
    "San Francisco, USA",
    "Seattle, USA",
    "Singapore, Singapore",
    "Sydney, Australia",
    "Tokyo, Japan",
    "Toronto, Canada",
    "Zurich, Switzerland",
];

const POPULAR_JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "UX/UI Designer",
    "DevOps Engineer",
    "Full Stack Developer",
    "Backend Developer",
    "Frontend Developer",
    "Machine Learning Engineer",
    "Cloud Architect",
    "Cybersecurity Analyst",
    "Business Analyst",
    "Project Manager",
    "Marketing Manager",
    "Sales Manager",
    "HR Manager",
    "Financial Analyst",
    "Operations Manager",
    "Customer Success Manager",
    "Technical Writer",
];
