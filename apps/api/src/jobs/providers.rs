//! RapidAPI job-search providers.
//!
//! Each provider exposes an incompatible response schema; everything is
//! normalized into [`JobPosting`] here so the rest of the pipeline never sees
//! provider-specific shapes. A failing provider is logged and skipped — the
//! next one is tried.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::jobs::models::JobPosting;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(15);

/// Stop querying further providers once one has returned at least this many
/// postings.
const ENOUGH_RESULTS: usize = 10;

/// Hard cap on postings returned to the ranking stage.
const MAX_RESULTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    JSearch,
    PrLabs,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::JSearch, Provider::PrLabs];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::JSearch => "JSearch API",
            Provider::PrLabs => "Job Search API by PR Labs",
        }
    }

    fn host(&self) -> &'static str {
        match self {
            Provider::JSearch => "jsearch.p.rapidapi.com",
            Provider::PrLabs => "jobs-search-api.p.rapidapi.com",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Provider::JSearch => "/search",
            Provider::PrLabs => "/api/jobs/search",
        }
    }

    fn query_params(&self, query: &str, location: &str) -> Vec<(&'static str, String)> {
        match self {
            Provider::JSearch => vec![
                ("query", format!("{query} in {location}")),
                ("page", "1".to_string()),
                ("num_pages", "1".to_string()),
            ],
            Provider::PrLabs => vec![
                ("q", query.to_string()),
                ("location", location.to_string()),
                ("limit", "10".to_string()),
            ],
        }
    }

    async fn fetch(
        &self,
        http: &Client,
        api_key: &str,
        query: &str,
        location: &str,
    ) -> Result<Value, reqwest::Error> {
        let url = format!("https://{}{}", self.host(), self.path());
        http.get(url)
            .query(&self.query_params(query, location))
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", self.host())
            .timeout(PROVIDER_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }

    /// Normalizes one provider response body into postings. Entries missing
    /// individual fields fall back to sensible defaults; a body with an
    /// unexpected overall shape yields no postings.
    pub fn parse_response(
        &self,
        body: &Value,
        work_mode: &str,
        fallback_location: &str,
        fetched_at: DateTime<Utc>,
    ) -> Vec<JobPosting> {
        let listings = match self {
            Provider::JSearch => body.get("data"),
            Provider::PrLabs => body.get("jobs").or_else(|| body.get("data")),
        };
        let Some(listings) = listings.and_then(Value::as_array) else {
            warn!("{} response is not an array of jobs", self.name());
            return vec![];
        };

        listings
            .iter()
            .enumerate()
            .map(|(index, job)| self.parse_job(job, index, work_mode, fallback_location, fetched_at))
            .collect()
    }

    fn parse_job(
        &self,
        job: &Value,
        index: usize,
        work_mode: &str,
        fallback_location: &str,
        fetched_at: DateTime<Utc>,
    ) -> JobPosting {
        let location = match (
            job.get("job_city").and_then(Value::as_str),
            job.get("job_country").and_then(Value::as_str),
        ) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            _ => first_str(job, &["location"])
                .unwrap_or_else(|| fallback_location.to_string()),
        };

        let posted_date = job
            .get("job_posted_at_timestamp")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.to_rfc3339())
            .or_else(|| first_str(job, &["posted_date"]))
            .unwrap_or_else(|| fetched_at.to_rfc3339());

        JobPosting {
            id: first_str(job, &["job_id", "id"]).unwrap_or_else(|| {
                format!("{}-{}-{}", self.name(), fetched_at.timestamp_millis(), index)
            }),
            title: first_str(job, &["job_title", "title", "position"])
                .unwrap_or_else(|| "Unknown Title".to_string()),
            company: first_str(job, &["employer_name", "company", "company_name"])
                .unwrap_or_else(|| "Unknown Company".to_string()),
            location,
            description: first_str(job, &["job_description", "description", "snippet"])
                .unwrap_or_else(|| "No description available".to_string()),
            salary: first_str(job, &["job_salary", "salary", "salary_range"])
                .unwrap_or_else(|| "Not specified".to_string()),
            work_mode: first_str(job, &["job_employment_type", "job_type"])
                .unwrap_or_else(|| work_mode.to_string()),
            url: first_str(job, &["job_apply_link", "url", "apply_url"])
                .unwrap_or_else(|| "#".to_string()),
            posted_date,
            relevance_score: 0,
            is_remote: job
                .get("job_is_remote")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            logo: first_str(job, &["employer_logo"]),
        }
    }
}

/// Queries the providers in order until one yields enough results, then
/// dedups and caps the combined list.
pub async fn search_providers(
    http: &Client,
    api_key: &str,
    query: &str,
    location: &str,
    work_mode: &str,
    fetched_at: DateTime<Utc>,
) -> Vec<JobPosting> {
    let mut results: Vec<JobPosting> = Vec::new();
    let mut any_success = false;

    for provider in Provider::ALL {
        if any_success && results.len() >= ENOUGH_RESULTS {
            break;
        }
        match provider.fetch(http, api_key, query, location).await {
            Ok(body) => {
                let jobs = provider.parse_response(&body, work_mode, location, fetched_at);
                if !jobs.is_empty() {
                    info!("{} returned {} jobs", provider.name(), jobs.len());
                    any_success = true;
                    results.extend(jobs);
                }
            }
            Err(e) => {
                warn!("{} failed: {e}", provider.name());
                continue;
            }
        }
    }

    let mut unique = dedup(results);
    unique.truncate(MAX_RESULTS);
    unique
}

/// Drops postings whose title+company pair has already been seen.
fn dedup(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(format!("{}-{}", job.title, job.company).to_lowercase()))
        .collect()
}

fn first_str(job: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| job.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetched_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_jsearch_response_normalizes() {
        let body = json!({
            "data": [{
                "job_id": "abc-123",
                "job_title": "Rust Engineer",
                "employer_name": "Ferrous Corp",
                "job_city": "Berlin",
                "job_country": "Germany",
                "job_description": "Build services",
                "job_apply_link": "https://jobs.example/abc-123",
                "job_posted_at_timestamp": 1717200000,
                "job_is_remote": true
            }]
        });
        let jobs =
            Provider::JSearch.parse_response(&body, "Remote", "Berlin, Germany", fetched_at());
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.id, "abc-123");
        assert_eq!(job.company, "Ferrous Corp");
        assert_eq!(job.location, "Berlin, Germany");
        assert!(job.is_remote);
        assert!(job.posted_date.starts_with("2024-06-01"));
    }

    #[test]
    fn test_pr_labs_response_uses_jobs_key() {
        let body = json!({
            "jobs": [{
                "id": "x1",
                "title": "QA Analyst",
                "company": "Testify",
                "location": "Austin, USA",
                "description": "Test all the things",
                "url": "https://jobs.example/x1"
            }]
        });
        let jobs = Provider::PrLabs.parse_response(&body, "On-site", "Austin, USA", fetched_at());
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "QA Analyst");
        assert_eq!(jobs[0].work_mode, "On-site");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let body = json!({"data": [{}]});
        let jobs =
            Provider::JSearch.parse_response(&body, "Hybrid", "Paris, France", fetched_at());
        let job = &jobs[0];
        assert_eq!(job.title, "Unknown Title");
        assert_eq!(job.company, "Unknown Company");
        assert_eq!(job.location, "Paris, France");
        assert_eq!(job.salary, "Not specified");
        assert_eq!(job.url, "#");
        assert!(job.id.starts_with("JSearch API-"));
        // Provider omitted the date: fetch time stands in.
        assert_eq!(job.posted_date, fetched_at().to_rfc3339());
    }

    #[test]
    fn test_non_array_body_yields_nothing() {
        let body = json!({"data": "rate limit exceeded"});
        assert!(Provider::JSearch
            .parse_response(&body, "Remote", "Lisbon, Portugal", fetched_at())
            .is_empty());
    }

    #[test]
    fn test_dedup_is_case_insensitive_on_title_company() {
        let make = |title: &str, company: &str| JobPosting {
            id: "1".into(),
            title: title.into(),
            company: company.into(),
            location: String::new(),
            description: String::new(),
            salary: String::new(),
            work_mode: String::new(),
            url: String::new(),
            posted_date: String::new(),
            relevance_score: 0,
            is_remote: false,
            logo: None,
        };
        let jobs = vec![
            make("Rust Engineer", "Acme"),
            make("rust engineer", "ACME"),
            make("Rust Engineer", "Globex"),
        ];
        assert_eq!(dedup(jobs).len(), 2);
    }
}
