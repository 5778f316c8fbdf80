// src/session.rs
//! One conversation with one active personality.
//!
//! A [`Session`] owns the personality record, its mood, and the transcript.
//! It has exactly two mutators: [`Session::switch_personality`], which
//! replaces all three together, and [`ChatController::handle_turn`], which
//! commits the new mood and the user/assistant pair only once the reply is
//! known. Dropping a turn future before it resolves leaves the session as it
//! was.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::emotion::{EmotionEngine, EmotionalState};
use crate::error::PersonaError;
use crate::heuristics::HeuristicResponder;
use crate::llm::postprocess::strip_reasoning;
use crate::llm::{fallback_reply, ChatMessage, ResponseGenerator, Role};
use crate::persona::{PersonalityRecord, PersonalityStore};

pub type ConversationEntry = ChatMessage;

/// Append-only transcript. The first entry is always the active
/// personality's system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    entries: Vec<ConversationEntry>,
}

impl ConversationHistory {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // Always false once constructed; pairs with `len` for clippy's
    // len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn system_prompt(&self) -> &str {
        &self.entries[0].content
    }

    /// Number of user/assistant exchanges so far.
    pub fn turns(&self) -> usize {
        (self.entries.len() - 1) / 2
    }

    fn push_exchange(&mut self, user: String, assistant: String) {
        self.entries.reserve(2);
        self.entries.push(ChatMessage::user(user));
        self.entries.push(ChatMessage::assistant(assistant));
    }

    /// Human-readable transcript; the system entry is not shown.
    pub fn render(&self, assistant_name: &str) -> String {
        self.entries
            .iter()
            .filter_map(|entry| match entry.role {
                Role::User => Some(format!("You: {}", entry.content)),
                Role::Assistant => Some(format!("{}: {}", assistant_name, entry.content)),
                Role::System => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    identifier: String,
    personality: Arc<PersonalityRecord>,
    emotion: EmotionalState,
    history: ConversationHistory,
}

impl Session {
    pub fn new(identifier: impl Into<String>, personality: Arc<PersonalityRecord>) -> Self {
        let emotion = personality.initial_emotion();
        let history = ConversationHistory::new(personality.system_prompt.clone());
        Self {
            identifier: identifier.into(),
            personality,
            emotion,
            history,
        }
    }

    /// Start a session with the store's first personality, or `preferred`
    /// when given.
    pub fn open(store: &PersonalityStore, preferred: Option<&str>) -> Result<Self, PersonaError> {
        let identifier = match preferred {
            Some(id) => id.to_string(),
            None => store
                .default_identifier()
                .ok_or_else(|| PersonaError::NotFound("<any personality>".to_string()))?,
        };
        let record = store.load(&identifier)?;
        info!("Session started with '{}' ({})", identifier, record.name);
        Ok(Self::new(identifier, record))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn personality(&self) -> &PersonalityRecord {
        &self.personality
    }

    pub fn emotion(&self) -> &EmotionalState {
        &self.emotion
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Replace the personality and reset mood and transcript to its
    /// defaults in one step.
    pub fn switch_personality(&mut self, identifier: impl Into<String>, personality: Arc<PersonalityRecord>) {
        *self = Self::new(identifier, personality);
        info!(
            "Switched personality to '{}' ({})",
            self.identifier, self.personality.name
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Heuristic,
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub source: ReplySource,
}

/// Runs turns against a session. Holds no per-conversation state, so one
/// controller can serve many sessions.
pub struct ChatController {
    heuristics: HeuristicResponder,
    emotions: EmotionEngine,
    generator: ResponseGenerator,
}

impl ChatController {
    pub fn new(generator: ResponseGenerator) -> Self {
        Self {
            heuristics: HeuristicResponder::default(),
            emotions: EmotionEngine::default(),
            generator,
        }
    }

    pub fn with_heuristics(mut self, heuristics: HeuristicResponder) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_emotions(mut self, emotions: EmotionEngine) -> Self {
        self.emotions = emotions;
        self
    }

    pub async fn handle_turn(&self, session: &mut Session, input: &str) -> TurnOutcome {
        if let Some(reply) = self.heuristics.try_respond(&session.personality, input) {
            session.history.push_exchange(input.to_string(), reply.clone());
            return TurnOutcome {
                reply,
                source: ReplySource::Heuristic,
            };
        }

        let mut emotion = session.emotion.clone();
        self.emotions.update(&mut emotion, input);

        let generated = self
            .generator
            .generate(&session.personality, &emotion, input, session.history.entries())
            .await;

        let outcome = match generated {
            Ok(reply) => TurnOutcome {
                reply: strip_reasoning(&reply),
                source: ReplySource::Model,
            },
            Err(e) => {
                warn!("Turn for '{}' fell back: {}", session.identifier, e);
                TurnOutcome {
                    reply: fallback_reply(&e),
                    source: ReplySource::Fallback,
                }
            }
        };

        session.emotion = emotion;
        session
            .history
            .push_exchange(input.to_string(), outcome.reply.clone());
        outcome
    }

    /// Load `identifier` from `store` and switch to it. On error the
    /// session is left untouched.
    pub fn switch(
        &self,
        session: &mut Session,
        store: &PersonalityStore,
        identifier: &str,
    ) -> Result<(), PersonaError> {
        let record = store.load(identifier)?;
        session.switch_personality(identifier, record);
        Ok(())
    }
}
