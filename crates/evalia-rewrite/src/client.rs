//! Anthropic Messages API client.
//!
//! One blocking request per text, no retries. Any non-success status is
//! surfaced with its raw body so the clinician sees what the service said.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RewriteError;
use crate::prompt::build_prompt;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Something that turns clinician prose into polished prose.
pub trait TextImprover {
    fn improve(&self, text: &str) -> Result<String, RewriteError>;
}

#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// Applies to each request on its own.
    pub timeout: Duration,
}

impl RewriteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicClient {
    agent: ureq::Agent,
    config: RewriteConfig,
}

impl AnthropicClient {
    pub fn new(config: RewriteConfig) -> Result<Self, RewriteError> {
        if config.api_key.trim().is_empty() {
            return Err(RewriteError::MissingApiKey);
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self { agent, config })
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Serialized request body for `text`.
    pub fn request_body(&self, text: &str) -> Result<String, RewriteError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: build_prompt(text),
            }],
        };
        Ok(serde_json::to_string(&request)?)
    }
}

impl TextImprover for AnthropicClient {
    fn improve(&self, text: &str) -> Result<String, RewriteError> {
        if text.trim().is_empty() {
            return Err(RewriteError::EmptyText);
        }

        let body = self.request_body(text)?;
        info!(model = %self.config.model, chars = text.len(), "requesting text rewrite");

        let mut response = self
            .agent
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .send(body.as_str())
            .map_err(|e| RewriteError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let raw = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RewriteError::Transport(e.to_string()))?;

        parse_response(status, &raw)
    }
}

/// Interpret a Messages API answer: the text of the first content element.
pub fn parse_response(status: u16, body: &str) -> Result<String, RewriteError> {
    if status != 200 {
        warn!(status, "rewrite request rejected");
        return Err(RewriteError::Status {
            status,
            body: body.to_string(),
        });
    }

    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| RewriteError::ResponseParse(e.to_string()))?;

    let text = parsed
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| RewriteError::ResponseParse("la respuesta no contiene texto".to_string()))?;

    debug!(chars = text.len(), "rewrite received");
    Ok(text)
}
