// src/llm/postprocess.rs
// Clean-up applied to raw completions before they reach the user

/// Separates the model's internal reasoning from the user-facing answer.
pub const RESPONSE_MARKER: &str = "RESPONSE:";

pub const DEFAULT_WORD_CAP: usize = 75;

/// Keep the first `cap` whitespace-separated words, joined by single spaces.
pub fn cap_words(text: &str, cap: usize) -> String {
    text.split_whitespace().take(cap).collect::<Vec<_>>().join(" ")
}

/// Keep only what follows the last marker, trimmed. Idempotent.
pub fn strip_reasoning(text: &str) -> String {
    match text.rsplit_once(RESPONSE_MARKER) {
        Some((_, answer)) => answer.trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Word cap first, then marker stripping.
pub fn finalize(raw: &str, cap: usize) -> String {
    strip_reasoning(&cap_words(raw, cap))
}
