// src/persona/record.rs
//! On-disk personality definition.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::emotion::EmotionalState;
use crate::error::PersonaError;

/// A personality as declared in its JSON file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityRecord {
    pub name: String,
    pub traits: String,
    pub emotional_state: String,
    pub emotional_intensity: i64,
    pub reasoning_style: String,
    pub anchors: Vec<String>,
    pub system_prompt: String,

    // Carried for the front-end; nothing in the chat loop enforces these.
    #[serde(default)]
    pub preferred_topics: Vec<String>,
    #[serde(default)]
    pub avoided_topics: Vec<String>,
    #[serde(default)]
    pub writing_style: BTreeMap<String, Value>,
    #[serde(default)]
    pub behavioral_guidelines: Vec<String>,
    #[serde(default)]
    pub historical_context: BTreeMap<String, Value>,
}

impl PersonalityRecord {
    /// Parse and validate a record. `id` is only used for error reporting.
    pub fn from_json_str(id: &str, text: &str) -> Result<Self, PersonaError> {
        serde_json::from_str(text).map_err(|e| PersonaError::Malformed {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, PersonaError> {
        let id = identifier_for(path);
        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => PersonaError::NotFound(id.clone()),
            _ => PersonaError::Io {
                id: id.clone(),
                source,
            },
        })?;
        Self::from_json_str(&id, &text)
    }

    /// Mood the personality starts every conversation with.
    pub fn initial_emotion(&self) -> EmotionalState {
        EmotionalState::new(self.emotional_state.clone(), self.emotional_intensity)
    }
}

/// Identifier of a record file: its filename stem.
pub fn identifier_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "name": "Edgar Allan Poe",
            "traits": "Melancholic, poetic",
            "emotional_state": "melancholy",
            "emotional_intensity": 6,
            "reasoning_style": "Gothic introspection",
            "anchors": ["the raven", "lost Lenore"],
            "system_prompt": "You are Edgar Allan Poe."
        })
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let record = PersonalityRecord::from_json_str("poe", &full_record().to_string()).unwrap();
        assert_eq!(record.name, "Edgar Allan Poe");
        assert_eq!(record.anchors, vec!["the raven", "lost Lenore"]);
        assert!(record.preferred_topics.is_empty());
        assert!(record.avoided_topics.is_empty());
        assert!(record.writing_style.is_empty());
        assert!(record.behavioral_guidelines.is_empty());
        assert!(record.historical_context.is_empty());
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        for field in [
            "name",
            "traits",
            "emotional_state",
            "emotional_intensity",
            "reasoning_style",
            "anchors",
            "system_prompt",
        ] {
            let mut value = full_record();
            value.as_object_mut().unwrap().remove(field);
            let err = PersonalityRecord::from_json_str("poe", &value.to_string()).unwrap_err();
            match err {
                PersonaError::Malformed { id, reason } => {
                    assert_eq!(id, "poe");
                    assert!(reason.contains(field), "reason '{}' should name '{}'", reason, field);
                }
                other => panic!("expected Malformed for missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let mut value = full_record();
        value["anchors"] = json!("not a list");
        assert!(matches!(
            PersonalityRecord::from_json_str("poe", &value.to_string()),
            Err(PersonaError::Malformed { .. })
        ));
    }

    #[test]
    fn test_initial_emotion_clamps() {
        let mut value = full_record();
        value["emotional_intensity"] = json!(14);
        let record = PersonalityRecord::from_json_str("poe", &value.to_string()).unwrap();
        let state = record.initial_emotion();
        assert_eq!(state.emotion, "melancholy");
        assert_eq!(state.intensity(), 10);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = PersonalityRecord::from_path(Path::new("/nonexistent/dir/tesla.json")).unwrap_err();
        assert!(matches!(err, PersonaError::NotFound(id) if id == "tesla"));
    }
}
