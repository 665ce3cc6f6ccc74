use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::progress::ProgressNotifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// HTTP client for link probes and job-search providers.
    /// Separate from the LLM client so its timeouts can stay short.
    pub http: reqwest::Client,
    pub progress: ProgressNotifier,
    pub config: Config,
}
