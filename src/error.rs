// src/error.rs
// Error types shared by the personality store and the completion provider

use std::time::Duration;

/// Failures while loading a personality definition.
///
/// These are fatal for the identifier that produced them and are surfaced
/// to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error("Personality not found: {0}")]
    NotFound(String),

    #[error("Malformed personality record '{id}': {reason}")]
    Malformed { id: String, reason: String },

    #[error("Failed to read personality '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures talking to the completion provider.
///
/// Never shown as a crash: the chat controller turns every variant into an
/// in-character reply.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Provider rejected credentials ({0})")]
    Unauthorized(u16),

    #[error("Provider API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}
