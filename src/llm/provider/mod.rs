// src/llm/provider/mod.rs
// LLM provider trait and the wire-level message types it speaks
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProviderError;

pub mod openai;

pub use openai::OpenAiChatProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message format for all providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling knobs sent with every completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.75,
            max_tokens: 150,
            top_p: 0.9,
            frequency_penalty: 0.3,
            presence_penalty: 0.5,
        }
    }
}

/// Unified response from any provider
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub metadata: ProviderMetadata,
}

/// Metadata returned by provider
#[derive(Debug, Clone, Default)]
pub struct ProviderMetadata {
    pub model_version: String,
    pub input_tokens: Option<i64>,
    pub output_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
    pub latency_ms: i64,
    pub finish_reason: Option<String>,
}

/// Universal completion provider interface
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging/debugging
    fn name(&self) -> &'static str;

    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
