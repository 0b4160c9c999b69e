//! HTTP provider for `generateContent`-style text generators.
//!
//! Sends the prompt as a single user turn and reads back the text of the
//! first candidate. Authentication is an API key header taken from the
//! environment variable named in [`InsightConfig::api_key_env`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InsightConfig;
use crate::error::{InsightError, InsightResult};
use crate::provider::{InsightProvider, InsightRequest};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "crease-scorer";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text generator reached over HTTPS.
pub struct GenerativeInsightClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

// Custom Debug to avoid exposing the API key
impl std::fmt::Debug for GenerativeInsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeInsightClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl GenerativeInsightClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> InsightResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(InsightError::NotConfigured("API key is empty".into()));
        }
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    /// Build a client from configuration, reading the key from the environment.
    pub fn from_config(config: &InsightConfig) -> InsightResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            InsightError::NotConfigured(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(&config.endpoint, &config.model, api_key)
    }

    /// Full URL of the generation call.
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn headers(&self) -> InsightResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| InsightError::NotConfigured(format!("invalid API key: {e}")))?;
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }
}

#[async_trait]
impl InsightProvider for GenerativeInsightClient {
    async fn generate(&self, request: &InsightRequest) -> InsightResult<String> {
        let body = GenerateRequest::from_prompt(&request.prompt);
        debug!(model = %self.model, balls = request.snapshot.len(), "requesting insight");

        let response = self
            .client
            .post(self.url())
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, trimmed.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
