//! Hardsub Studio Insights
//!
//! Short advisory text describing the simulated processing plan:
//! - **Contract:** [`InsightsFetcher`] always resolves to a string and never fails
//! - **Gemini:** Remote generative-text client ([`GeminiInsights`])
//! - **Static:** Fixed-text fetcher for offline use and tests ([`StaticInsights`])
//!
//! Failures inside a fetcher are logged and replaced with [`FALLBACK_TEXT`].

pub mod gemini;
pub mod request;

use std::sync::Arc;

use async_trait::async_trait;
use hardsub_common::config::InsightsConfig;

pub use gemini::GeminiInsights;
pub use request::{build_prompt, InsightsRequest};

/// Text shown whenever insights cannot be produced.
pub const FALLBACK_TEXT: &str = "Ready to process video stream...";

/// Internal failures of an insights fetch. Never escapes a fetcher.
#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

/// Produces insights text for a hardsub request.
///
/// Implementations must not fail: every error is recovered into
/// [`FALLBACK_TEXT`] (or another fixed string).
#[async_trait]
pub trait InsightsFetcher: Send + Sync {
    async fn fetch(&self, request: &InsightsRequest) -> String;

    /// Fetcher name, for logs.
    fn name(&self) -> &str;
}

/// Fetcher that answers every request with the same text.
#[derive(Debug, Clone)]
pub struct StaticInsights {
    text: String,
}

impl StaticInsights {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Always answers with [`FALLBACK_TEXT`].
    pub fn fallback() -> Self {
        Self::new(FALLBACK_TEXT)
    }
}

#[async_trait]
impl InsightsFetcher for StaticInsights {
    async fn fetch(&self, _request: &InsightsRequest) -> String {
        self.text.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Pick the fetcher described by the configuration.
///
/// Without a credential (or with insights disabled) the static fallback is
/// used, which matches what a failing remote call would show.
pub fn fetcher_from_config(config: &InsightsConfig) -> Arc<dyn InsightsFetcher> {
    if !config.enabled {
        tracing::info!("Insights disabled by configuration");
        return Arc::new(StaticInsights::fallback());
    }

    let Some(api_key) = config.api_key() else {
        tracing::info!(
            env = %config.api_key_env,
            "No insights API key found, using fallback text"
        );
        return Arc::new(StaticInsights::fallback());
    };

    match GeminiInsights::new(config, api_key) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "Could not build insights client, using fallback text");
            Arc::new(StaticInsights::fallback())
        }
    }
}
