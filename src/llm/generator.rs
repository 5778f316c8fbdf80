// src/llm/generator.rs
// Builds the persona prompt, calls the provider, and cleans up the reply

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::postprocess::{finalize, DEFAULT_WORD_CAP};
use super::prompt::assemble_messages;
use super::provider::{ChatMessage, LlmProvider, SamplingParams};
use crate::emotion::EmotionalState;
use crate::error::ProviderError;
use crate::persona::PersonalityRecord;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// In-character text shown when the provider call fails.
pub fn fallback_reply(err: &ProviderError) -> String {
    format!("I seem to have encountered an error in my thoughts: {}", err)
}

pub struct ResponseGenerator {
    provider: Arc<dyn LlmProvider>,
    params: SamplingParams,
    word_cap: usize,
    timeout: Duration,
}

impl ResponseGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            params: SamplingParams::default(),
            word_cap: DEFAULT_WORD_CAP,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_word_cap(mut self, word_cap: usize) -> Self {
        self.word_cap = word_cap;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn generate(
        &self,
        personality: &PersonalityRecord,
        state: &EmotionalState,
        input: &str,
        history: &[ChatMessage],
    ) -> Result<String, ProviderError> {
        let messages = assemble_messages(personality, state, input, history);
        debug!(
            "Generating reply for {} via {} ({} messages)",
            personality.name,
            self.provider.name(),
            messages.len()
        );

        let response = tokio::time::timeout(self.timeout, self.provider.chat(&messages, &self.params))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))??;

        Ok(finalize(&response.content, self.word_cap))
    }
}
