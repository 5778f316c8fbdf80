// src/llm/mod.rs

pub mod generator;
pub mod postprocess;
pub mod prompt;
pub mod provider;

pub use generator::{fallback_reply, ResponseGenerator};
pub use provider::{ChatMessage, LlmProvider, OpenAiChatProvider, Role, SamplingParams};
