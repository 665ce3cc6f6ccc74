//! Deterministic fallback ranking used when LLM re-ranking fails.
//!
//! Pure scoring over title overlap, work-mode match, and posting recency,
//! capped at 100. The LLM path produces the same shape, so callers never see
//! which ranker ran.

use chrono::{DateTime, Utc};

use crate::jobs::models::{JobPosting, SearchRequest};

/// How many ranked postings are returned to the client.
const TOP_RESULTS: usize = 10;

const FULL_TITLE_MATCH: u32 = 50;
const WORD_MATCH: u32 = 10;
const WORK_MODE_MATCH: u32 = 30;
const POSTED_WITHIN_WEEK: u32 = 20;
const POSTED_WITHIN_MONTH: u32 = 10;

pub fn fallback_rank(
    jobs: Vec<JobPosting>,
    request: &SearchRequest,
    now: DateTime<Utc>,
) -> Vec<JobPosting> {
    let mut scored: Vec<JobPosting> = jobs
        .into_iter()
        .map(|mut job| {
            job.relevance_score = score_job(&job, request, now);
            job
        })
        .collect();

    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored.truncate(TOP_RESULTS);
    scored
}

fn score_job(job: &JobPosting, request: &SearchRequest, now: DateTime<Utc>) -> u32 {
    let mut score = job.relevance_score;

    let title = job.title.to_lowercase();
    let search_title = request.job_title.to_lowercase();

    if !search_title.is_empty() && title.contains(&search_title) {
        score += FULL_TITLE_MATCH;
    }
    for word in search_title.split_whitespace() {
        if title.contains(word) {
            score += WORD_MATCH;
        }
    }

    if job.work_mode == request.work_mode {
        score += WORK_MODE_MATCH;
    }

    // Unparseable or missing dates count as a month old.
    let days_since_posted = DateTime::parse_from_rfc3339(&job.posted_date)
        .map(|posted| (now - posted.with_timezone(&Utc)).num_days())
        .unwrap_or(30);
    if days_since_posted <= 7 {
        score += POSTED_WITHIN_WEEK;
    } else if days_since_posted <= 30 {
        score += POSTED_WITHIN_MONTH;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SearchRequest {
        SearchRequest {
            job_title: "Rust Engineer".to_string(),
            work_mode: "Remote".to_string(),
            location: "Berlin, Germany".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn job(title: &str, work_mode: &str, posted: &str) -> JobPosting {
        JobPosting {
            id: "1".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Berlin, Germany".to_string(),
            description: String::new(),
            salary: String::new(),
            work_mode: work_mode.to_string(),
            url: String::new(),
            posted_date: posted.to_string(),
            relevance_score: 0,
            is_remote: false,
            logo: None,
        }
    }

    #[test]
    fn test_exact_title_recent_remote_scores_highest_and_caps() {
        // 50 (full title) + 20 (two words) + 30 (mode) + 20 (fresh) = 120 → 100.
        let scored = score_job(
            &job("Senior Rust Engineer", "Remote", "2024-06-14T00:00:00Z"),
            &request(),
            now(),
        );
        assert_eq!(scored, 100);
    }

    #[test]
    fn test_partial_word_match_scores_lower() {
        // Only "engineer" matches (+10) and the posting is 20 days old (+10).
        let scored = score_job(
            &job("Platform Engineer", "On-site", "2024-05-26T00:00:00Z"),
            &request(),
            now(),
        );
        assert_eq!(scored, 20);
    }

    #[test]
    fn test_unparseable_date_counts_as_month_old() {
        let scored = score_job(&job("Accountant", "On-site", "Recently"), &request(), now());
        assert_eq!(scored, POSTED_WITHIN_MONTH);
    }

    #[test]
    fn test_rank_sorts_descending_and_truncates() {
        let mut jobs = Vec::new();
        for i in 0..15 {
            let title = if i % 2 == 0 {
                "Rust Engineer"
            } else {
                "Gardener"
            };
            jobs.push(job(title, "Remote", "2024-06-14T00:00:00Z"));
        }
        let ranked = fallback_rank(jobs, &request(), now());
        assert_eq!(ranked.len(), 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        assert_eq!(ranked[0].title, "Rust Engineer");
    }

    #[test]
    fn test_existing_relevance_score_is_additive() {
        let mut j = job("Gardener", "On-site", "Recently");
        j.relevance_score = 40;
        // 40 + 10 (month-old default) = 50.
        assert_eq!(score_job(&j, &request(), now()), 50);
    }
}
