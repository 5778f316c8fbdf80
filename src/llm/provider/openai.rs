// src/llm/provider/openai.rs
// OpenAI Chat Completions provider

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

use super::{ChatMessage, LlmProvider, ProviderMetadata, ProviderResponse, SamplingParams};
use crate::error::ProviderError;

pub struct OpenAiChatProvider {
    client: Client,
    api_key: String,
    url: String,
}

impl OpenAiChatProvider {
    /// `url` is the full chat-completions endpoint.
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            url,
        }
    }

    pub fn request_body(messages: &[ChatMessage], params: &SamplingParams) -> Value {
        json!({
            "model": params.model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "top_p": params.top_p,
            "frequency_penalty": params.frequency_penalty,
            "presence_penalty": params.presence_penalty,
        })
    }

    /// Pull the reply and usage out of a chat-completions payload.
    pub fn parse_response(raw: &Value, latency_ms: i64) -> Result<ProviderResponse, ProviderError> {
        let content = raw["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::EmptyResponse)?
            .to_string();

        let usage = &raw["usage"];
        let metadata = ProviderMetadata {
            model_version: raw["model"].as_str().unwrap_or_default().to_string(),
            input_tokens: usage["prompt_tokens"].as_i64(),
            output_tokens: usage["completion_tokens"].as_i64(),
            total_tokens: usage["total_tokens"].as_i64(),
            latency_ms,
            finish_reason: raw["choices"][0]["finish_reason"]
                .as_str()
                .map(|s| s.to_string()),
        };

        Ok(ProviderResponse { content, metadata })
    }
}

#[async_trait]
impl LlmProvider for OpenAiChatProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let start = Instant::now();
        let body = Self::request_body(messages, params);

        debug!(
            "OpenAI request: model={}, messages={}",
            params.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = serde_json::from_slice(&response.bytes().await?)?;
        let latency_ms = start.elapsed().as_millis() as i64;
        let parsed = Self::parse_response(&raw, latency_ms)?;

        debug!(
            "OpenAI response: {}ms, tokens={:?}, finish={:?}",
            parsed.metadata.latency_ms, parsed.metadata.total_tokens, parsed.metadata.finish_reason
        );

        Ok(parsed)
    }
}
