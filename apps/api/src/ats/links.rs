//! Link validation — extracts URLs from resume text and probes each one.
//!
//! Probing is best-effort: a timeout, transport error, or non-200 status
//! marks the link invalid and the pipeline moves on. This stage never aborts
//! an analysis. Duplicate links are probed and counted individually.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::ats::models::{LinkStatus, LinkValidation};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("valid URL pattern"))
}

/// Returns every HTTP(S) URL in the text, in order of appearance,
/// duplicates included.
pub fn extract_links(text: &str) -> Vec<String> {
    url_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Probes each extracted link with a bounded timeout.
pub async fn validate_links(http: &Client, resume_text: &str) -> LinkValidation {
    let links = extract_links(resume_text);
    let mut results = Vec::with_capacity(links.len());

    for link in links {
        let status = probe(http, &link).await;
        debug!("link probe {link}: {status:?}");
        results.push(status);
    }

    summarize(results)
}

async fn probe(http: &Client, link: &str) -> LinkStatus {
    match http.head(link).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) => LinkStatus {
            link: link.to_string(),
            status: Some(response.status().as_u16()),
            valid: response.status() == StatusCode::OK,
        },
        Err(_) => LinkStatus {
            link: link.to_string(),
            status: None,
            valid: false,
        },
    }
}

fn summarize(results: Vec<LinkStatus>) -> LinkValidation {
    let valid_links = results.iter().filter(|r| r.valid).count();
    LinkValidation {
        total_links: results.len(),
        valid_links,
        link_validation: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_finds_http_and_https() {
        let text = "Portfolio: https://example.com/me and http://blog.example.org/posts";
        let links = extract_links(text);
        assert_eq!(
            links,
            vec!["https://example.com/me", "http://blog.example.org/posts"]
        );
    }

    #[test]
    fn test_extract_links_keeps_duplicates() {
        let text = "https://github.com/jane https://github.com/jane";
        assert_eq!(extract_links(text).len(), 2);
    }

    #[test]
    fn test_extract_links_none() {
        assert!(extract_links("no links in this resume").is_empty());
    }

    #[test]
    fn test_summarize_counts_valid() {
        let results = vec![
            LinkStatus {
                link: "https://a".into(),
                status: Some(200),
                valid: true,
            },
            LinkStatus {
                link: "https://b".into(),
                status: Some(404),
                valid: false,
            },
            LinkStatus {
                link: "https://c".into(),
                status: None,
                valid: false,
            },
        ];
        let summary = summarize(results);
        assert_eq!(summary.total_links, 3);
        assert_eq!(summary.valid_links, 1);
        assert!(summary.valid_links <= summary.total_links);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(vec![]);
        assert_eq!(summary.total_links, 0);
        assert_eq!(summary.valid_links, 0);
    }

    #[tokio::test]
    async fn test_probe_failure_is_invalid_not_error() {
        // Unroutable port on localhost: the probe must fold the failure into
        // an invalid link instead of propagating it.
        let http = Client::new();
        let status = probe(&http, "http://127.0.0.1:1/resume").await;
        assert!(!status.valid);
        assert_eq!(status.status, None);
    }
}
