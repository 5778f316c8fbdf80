// src/heuristics.rs
//! Canned replies that short-circuit the language model.
//!
//! Triggers are plain, case-insensitive substrings (so "deathly" fires the
//! "death" trigger) checked in table order; the first hit wins.

use std::fmt;
use tracing::debug;

use crate::persona::PersonalityRecord;

type Template = Box<dyn Fn(&str) -> String + Send + Sync>;

pub struct HeuristicRule {
    trigger: String,
    template: Template,
}

impl HeuristicRule {
    /// `template` receives the personality's display name.
    pub fn new<F>(trigger: &str, template: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            trigger: trigger.to_lowercase(),
            template: Box::new(template),
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn render(&self, name: &str) -> String {
        (self.template)(name)
    }
}

impl fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicRule")
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct HeuristicResponder {
    rules: Vec<HeuristicRule>,
}

impl Default for HeuristicResponder {
    fn default() -> Self {
        Self::with_rules(vec![
            HeuristicRule::new("death", |name| {
                format!(
                    "Ah, death! The eternal muse of my musings. {} cannot help but dwell upon its mystery.",
                    name
                )
            }),
            HeuristicRule::new("love", |_| {
                "Love, that bittersweet elixir, fills my heart with both longing and sorrow.".to_string()
            }),
            HeuristicRule::new("raven", |_| {
                "The raven, ever watchful, remains a steadfast symbol of my contemplations.".to_string()
            }),
            HeuristicRule::new("victory", |name| {
                format!(
                    "A triumph worthy of remembrance! {} exults in such glories.",
                    name
                )
            }),
            HeuristicRule::new("tragedy", |_| {
                "The weight of sorrow lingers in my thoughts, as all great tragedies do.".to_string()
            }),
        ])
    }
}

impl HeuristicResponder {
    pub fn with_rules(rules: Vec<HeuristicRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    pub fn try_respond(&self, personality: &PersonalityRecord, input: &str) -> Option<String> {
        let lowered = input.to_lowercase();
        let rule = self.rules.iter().find(|r| lowered.contains(&r.trigger))?;
        debug!("Heuristic '{}' pre-empted generation", rule.trigger);
        Some(rule.render(&personality.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poe() -> PersonalityRecord {
        PersonalityRecord {
            name: "Edgar Allan Poe".to_string(),
            traits: "Melancholic".to_string(),
            emotional_state: "melancholy".to_string(),
            emotional_intensity: 5,
            reasoning_style: "Gothic".to_string(),
            anchors: vec![],
            system_prompt: "You are Poe.".to_string(),
            preferred_topics: vec![],
            avoided_topics: vec![],
            writing_style: Default::default(),
            behavioral_guidelines: vec![],
            historical_context: Default::default(),
        }
    }

    #[test]
    fn test_no_trigger_no_reply() {
        let responder = HeuristicResponder::default();
        assert_eq!(responder.try_respond(&poe(), "What is electricity?"), None);
    }

    #[test]
    fn test_templates_use_personality_name() {
        let responder = HeuristicResponder::default();
        let reply = responder.try_respond(&poe(), "Do you fear death?").unwrap();
        assert_eq!(
            reply,
            "Ah, death! The eternal muse of my musings. Edgar Allan Poe cannot help but dwell upon its mystery."
        );
        let reply = responder.try_respond(&poe(), "A VICTORY!").unwrap();
        assert_eq!(reply, "A triumph worthy of remembrance! Edgar Allan Poe exults in such glories.");
    }

    #[test]
    fn test_substring_match_not_word_boundary() {
        let responder = HeuristicResponder::default();
        let reply = responder.try_respond(&poe(), "Such a lovely evening").unwrap();
        assert!(reply.starts_with("Love, that bittersweet elixir"));
    }

    #[test]
    fn test_first_trigger_in_table_order_wins() {
        // "raven" appears first in the input, but "love" precedes it in the table
        let responder = HeuristicResponder::default();
        let reply = responder.try_respond(&poe(), "The raven and your love").unwrap();
        assert!(reply.starts_with("Love, that bittersweet elixir"));
    }

    #[test]
    fn test_custom_rules() {
        let responder = HeuristicResponder::with_rules(vec![HeuristicRule::new("Coil", |name| {
            format!("{} speaks of induction.", name)
        })]);
        assert_eq!(responder.rules()[0].trigger(), "coil");
        assert_eq!(
            responder.try_respond(&poe(), "tesla coil").as_deref(),
            Some("Edgar Allan Poe speaks of induction.")
        );
    }
}
