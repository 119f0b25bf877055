//! OpenAI-compatible chat-completions provider.
//!
//! Works with OpenRouter, OpenAI and any server exposing
//! `POST {base_url}/v1/chat/completions`.

use super::ProviderAdapter;
use crate::config::FileEndpointConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swarm_application::{ChatMessage, ChatRequest, ChatResponse, GatewayError};
use swarm_domain::redact;
use tracing::debug;

/// Longest provider error body kept in a [`GatewayError::Http`] message.
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionReply {
    id: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Chat-completions adapter for one endpoint.
pub struct OpenAiCompatibleProvider {
    name: String,
    base_url: String,
    api_key: Option<String>,
    strip_vendor_prefix: bool,
    http: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            strip_vendor_prefix: false,
            http: reqwest::Client::new(),
        }
    }

    /// Build from config, resolving the key from `api_key` or the named
    /// environment variable.
    pub fn from_config(name: &str, config: &FileEndpointConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(&config.api_key_env).ok())
            .filter(|key| !key.trim().is_empty());
        Self::new(name, &config.base_url, api_key)
            .with_strip_vendor_prefix(config.strip_vendor_prefix)
    }

    pub fn with_strip_vendor_prefix(mut self, strip: bool) -> Self {
        self.strip_vendor_prefix = strip;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Model id as this endpoint expects it.
    fn wire_model<'a>(&self, model: &'a str) -> &'a str {
        if self.strip_vendor_prefix {
            model.split_once('/').map_or(model, |(_, name)| name)
        } else {
            model
        }
    }
}

fn map_send_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{cut}...")
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredentials(self.name.clone()))?;

        let body = CompletionBody {
            model: self.wire_model(&request.model),
            messages: &request.messages,
            max_tokens: request.max_tokens,
        };

        debug!(provider = %self.name, model = body.model, "Sending chat completion");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: truncate_body(&redact(&text)),
            });
        }

        let reply: CompletionReply = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("malformed body: {e}")))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no message content".to_string()))?;

        Ok(ChatResponse {
            id: reply.id,
            content,
        })
    }
}
