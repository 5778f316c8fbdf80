// src/emotion/mod.rs
//! Keyword-driven mood transitions.
//!
//! The engine walks an ordered rule table. Every rule whose keyword appears
//! as a whole word in the input is applied in table order: the label is
//! overwritten each time (so the last match wins) and intensity deltas
//! compound, clamped after every step.

pub mod state;

pub use state::{EmotionalState, MAX_INTENSITY, MIN_INTENSITY};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A single keyword trigger.
#[derive(Debug, Clone)]
pub struct EmotionRule {
    keyword: String,
    pattern: Regex,
    pub emotion: String,
    pub delta: i32,
}

impl EmotionRule {
    /// Build a rule matching `keyword` on word boundaries, ignoring case.
    pub fn new(keyword: &str, emotion: impl Into<String>, delta: i32) -> Result<Self, regex::Error> {
        let keyword = keyword.to_lowercase();
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&keyword)))?;
        Ok(Self {
            keyword,
            pattern,
            emotion: emotion.into(),
            delta,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn matches(&self, lowered_input: &str) -> bool {
        self.pattern.is_match(lowered_input)
    }
}

/// Default trigger table. Order is part of the contract.
pub const DEFAULT_RULES: &[(&str, &str, i32)] = &[
    ("death", "melancholy", 3),
    ("love", "nostalgic", 2),
    ("fear", "anxious", 3),
    ("hope", "reflective", -2),
    ("raven", "curious", 2),
    ("mortality", "introspective", 3),
    ("tragedy", "sorrowful", 3),
    ("victory", "proud", 2),
    ("war", "determined", 2),
    ("dreams", "idealistic", 2),
    ("loss", "grieving", 3),
];

static DEFAULT_ENGINE: Lazy<EmotionEngine> = Lazy::new(|| {
    let rules = DEFAULT_RULES
        .iter()
        .map(|(keyword, emotion, delta)| {
            EmotionRule::new(keyword, *emotion, *delta).expect("valid regex")
        })
        .collect();
    EmotionEngine { rules }
});

#[derive(Debug, Clone)]
pub struct EmotionEngine {
    rules: Vec<EmotionRule>,
}

impl Default for EmotionEngine {
    fn default() -> Self {
        DEFAULT_ENGINE.clone()
    }
}

impl EmotionEngine {
    pub fn with_rules(rules: Vec<EmotionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[EmotionRule] {
        &self.rules
    }

    /// Apply every matching rule to `state` and return how many fired.
    /// No match leaves `state` untouched.
    pub fn update(&self, state: &mut EmotionalState, input: &str) -> usize {
        let lowered = input.to_lowercase();
        let mut applied = 0;

        for rule in self.rules.iter().filter(|r| r.matches(&lowered)) {
            state.emotion.clone_from(&rule.emotion);
            state.adjust(rule.delta);
            applied += 1;
            debug!(
                "Emotion rule '{}' fired -> {} ({:+})",
                rule.keyword, rule.emotion, rule.delta
            );
        }

        applied
    }
}
