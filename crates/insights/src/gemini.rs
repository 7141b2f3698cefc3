//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use hardsub_common::config::InsightsConfig;
use serde::{Deserialize, Serialize};

use crate::request::{build_prompt, InsightsRequest};
use crate::{InsightsError, InsightsFetcher, FALLBACK_TEXT};

const USER_AGENT: &str = concat!("hardsub-studio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Remote insights client.
pub struct GeminiInsights {
    http_client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl GeminiInsights {
    pub fn new(config: &InsightsConfig, api_key: String) -> Result<Self, InsightsError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| InsightsError::Network(e.to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http_client,
            url,
            model: config.model.clone(),
            api_key,
        })
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// One request, with every failure surfaced.
    pub async fn try_fetch(&self, request: &InsightsRequest) -> Result<String, InsightsError> {
        let prompt = build_prompt(request);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        tracing::debug!(model = %self.model, video = %request.video_name, "Requesting insights");

        let response = self
            .http_client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InsightsError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InsightsError::Parse(e.to_string()))?;

        parsed.text().ok_or(InsightsError::EmptyResponse)
    }
}

#[async_trait]
impl InsightsFetcher for GeminiInsights {
    async fn fetch(&self, request: &InsightsRequest) -> String {
        match self.try_fetch(request).await {
            Ok(text) => {
                tracing::info!(chars = text.len(), "Insights received");
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "Insights request failed, using fallback text");
                FALLBACK_TEXT.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [ { "text": "- a\n" }, { "text": "- b" } ] } },
                    { "content": { "parts": [ { "text": "ignored" } ] } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("- a\n- b"));
    }

    #[test]
    fn test_response_without_text_is_none() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{ "candidates": [ { "content": { "parts": [] } } ] }"#)
                .unwrap();
        assert!(parsed.text().is_none());

        let blocked: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(blocked.text().is_none());
    }

    #[test]
    fn test_url_is_built_from_endpoint_and_model() {
        let config = InsightsConfig {
            endpoint: "http://localhost:8080/v1beta/".to_string(),
            model: "test-model".to_string(),
            ..InsightsConfig::default()
        };
        let client = GeminiInsights::new(&config, "key".to_string()).unwrap();
        assert_eq!(
            client.url(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }
}
