//! Anthropic Messages API client.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, CompletionConfig};
use crate::ports::{
    CompletionClient, CompletionClientFactory, CompletionRequest, CompletionResponse,
};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const X_API_KEY: &str = "x-api-key";
const ANTHROPIC_VERSION: &str = "anthropic-version";
const DEFAULT_STATUS_MESSAGE: &str = "Completion request failed";

/// HTTP transport for the Messages API.
///
/// One request per call; failures are reported as-is without retrying.
#[derive(Clone)]
pub struct HttpCompletionClient {
    api_key: String,
    api_url: Url,
    model: String,
    anthropic_version: String,
    client: Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    pub fn new(api_key: String, config: &CompletionConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::CompletionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            anthropic_version: config.anthropic_version.clone(),
            client,
        })
    }

    /// Read the API key from `ANTHROPIC_API_KEY`.
    pub fn from_env_with_config(config: &CompletionConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::PromptServiceUnavailable(format!("{} is not set", API_KEY_ENV))
            })?;

        Self::new(api_key, config)
    }

    fn send_request(&self, request: &ApiRequest<'_>) -> Result<CompletionResponse, AppError> {
        debug!("POST {} ({} message(s))", self.api_url, request.messages.len());
        let response = self
            .client
            .post(self.api_url.clone())
            .header(X_API_KEY, &self.api_key)
            .header(ANTHROPIC_VERSION, &self.anthropic_version)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::CompletionFailed("Completion request timed out".into())
                } else {
                    AppError::CompletionFailed(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
                AppError::CompletionFailed(format!("Failed to parse response: {}", e))
            })?;

            let text = api_response
                .content
                .into_iter()
                .find_map(|block| block.text)
                .ok_or_else(|| AppError::CompletionFailed("Response contained no text".into()))?;

            return Ok(CompletionResponse { text });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.trim().to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::CompletionFailed(format!("HTTP {}: {}", status.as_u16(), message)))
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        let api_request = ApiRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: request
                .messages
                .iter()
                .map(|turn| ApiMessage { role: turn.role.as_str(), content: &turn.content })
                .collect(),
        };

        self.send_request(&api_request)
    }
}

/// Creates the HTTP client when a completion is first needed.
#[derive(Debug, Clone)]
pub struct EnvCompletionClientFactory {
    config: CompletionConfig,
}

impl EnvCompletionClientFactory {
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }
}

impl CompletionClientFactory for EnvCompletionClientFactory {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError> {
        Ok(Box::new(HttpCompletionClient::from_env_with_config(&self.config)?))
    }
}
