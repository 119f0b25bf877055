//! LLM Gateway port
//!
//! Defines the chat-completion contract the pipeline uses to reach model
//! providers. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swarm_domain::redact;
use thiserror::Error;

/// HTTP statuses treated as transient: advance to the next fallback model.
pub const TRANSIENT_STATUSES: &[u16] = &[404, 408, 409, 425, 429, 500, 502, 503, 504];

const RATE_LIMIT_PHRASES: &[&str] = &["rate limit", "too many requests", "quota"];
const TIMEOUT_PHRASES: &[&str] = &["timeout", "timed out", "aborted", "deadline"];

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials for {0}")]
    MissingCredentials(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl GatewayError {
    /// Whether the failure should advance the fallback chain rather than
    /// end it.
    ///
    /// Transient: the listed HTTP statuses, timeouts, malformed or empty
    /// output, and any message mentioning rate limits or timeouts.
    pub fn is_transient(&self) -> bool {
        let message = match self {
            GatewayError::Timeout | GatewayError::InvalidResponse(_) => return true,
            GatewayError::MissingCredentials(_) => return false,
            GatewayError::Http { status, .. } if TRANSIENT_STATUSES.contains(status) => {
                return true;
            }
            GatewayError::Http { message, .. }
            | GatewayError::ConnectionError(message)
            | GatewayError::RequestFailed(message) => message.to_lowercase(),
        };
        RATE_LIMIT_PHRASES
            .iter()
            .chain(TIMEOUT_PHRASES)
            .any(|phrase| message.contains(phrase))
    }

    /// Copy of the error with every message redacted.
    pub fn redacted(&self) -> Self {
        match self {
            GatewayError::Http { status, message } => GatewayError::Http {
                status: *status,
                message: redact(message),
            },
            GatewayError::Timeout => GatewayError::Timeout,
            GatewayError::ConnectionError(m) => GatewayError::ConnectionError(redact(m)),
            GatewayError::InvalidResponse(m) => GatewayError::InvalidResponse(redact(m)),
            GatewayError::MissingCredentials(m) => GatewayError::MissingCredentials(redact(m)),
            GatewayError::RequestFailed(m) => GatewayError::RequestFailed(redact(m)),
        }
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completion request for one model
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: &str, user: &str, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens,
        }
    }
}

/// Response content of a chat completion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatResponse {
    /// Provider-side completion id
    pub id: Option<String>,
    pub content: String,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer. Timeouts are
/// applied by the caller, so adapters may block for as long as the transport
/// allows.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one chat-completion request
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError>;

    /// Verify that credentials exist for `model` without calling it
    fn check_credentials(&self, _model: &str) -> Result<(), GatewayError> {
        Ok(())
    }
}
