//! Text-generation client for the trend picker.
//!
//! This crate is the seam between the picker and the remote generative
//! text service. It provides:
//! - The `TextGenerator` trait the orchestrator depends on
//! - Chat request/message types
//! - `ChatCompletionsClient`, an HTTP implementation for
//!   OpenAI-compatible `/chat/completions` endpoints
//! - Error classification (content failures vs transport failures)

pub mod config;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub use config::ClientConfig;

/// Errors that can occur when talking to the text-generation service
#[derive(Error, Debug)]
pub enum LlmClientError {
    #[error("Failed to reach text-generation service: {0}")]
    Connection(String),

    #[error("Text-generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from text-generation service: {0}")]
    InvalidResponse(String),

    #[error("Text-generation service returned no completion text")]
    EmptyCompletion,

    #[error("Text-generation request timed out after {0:?}")]
    Timeout(Duration),
}

impl LlmClientError {
    /// True when the service answered (or was waited on) but gave us nothing
    /// usable, as opposed to the call itself failing.
    pub fn is_content_failure(&self) -> bool {
        matches!(
            self,
            LlmClientError::InvalidResponse(_)
                | LlmClientError::EmptyCompletion
                | LlmClientError::Timeout(_)
        )
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion request: model, sampling temperature, ordered messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            messages: Vec::new(),
        }
    }

    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Content of the first message with the given role.
    pub fn content_for(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

// =============================================================================
// Generator trait
// =============================================================================

/// Anything that can turn a chat request into completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the request and return the text of the first completion choice.
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmClientError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: ClientConfig) -> Result<Self, LlmClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmClientError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Get the endpoint this client posts to.
    pub fn endpoint(&self) -> String {
        self.config.completions_url()
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmClientError {
        if e.is_timeout() {
            LlmClientError::Timeout(self.config.timeout)
        } else {
            LlmClientError::Connection(e.to_string())
        }
    }

    /// The service already answered with a success status, so a broken body
    /// is a bad reply rather than a transport failure.
    fn map_body_error(&self, e: reqwest::Error) -> LlmClientError {
        if e.is_timeout() {
            LlmClientError::Timeout(self.config.timeout)
        } else {
            LlmClientError::InvalidResponse(e.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmClientError> {
        let endpoint = self.endpoint();
        debug!(
            "Sending chat completion to {} (model: {}, messages: {})",
            endpoint,
            request.model,
            request.messages.len()
        );

        let mut builder = self.client.post(&endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Chat completion request failed: {}", e);
            self.map_send_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Chat completion returned HTTP {}", status);
            return Err(LlmClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| {
            error!("Failed to read chat completion body: {}", e);
            self.map_body_error(e)
        })?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmClientError::EmptyCompletion)
    }
}
