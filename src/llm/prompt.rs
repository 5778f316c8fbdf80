// src/llm/prompt.rs
// Prompt assembly for a single persona turn

use crate::emotion::EmotionalState;
use crate::llm::provider::ChatMessage;
use crate::persona::PersonalityRecord;

/// Private instruction block: who to be, the current mood, and the anchors
/// to lean on.
pub fn build_reasoning_prompt(personality: &PersonalityRecord, state: &EmotionalState) -> String {
    let mut prompt = String::new();

    prompt.push_str("INTERNAL THOUGHT PROCESS (not shown to user):\n");
    prompt.push_str(&format!("You are {}. Think as they would:\n", personality.name));
    prompt.push_str("- Interpret the user's message.\n");
    prompt.push_str(&format!(
        "- Reflect on your current mood: {} (Intensity: {}).\n",
        state.emotion,
        state.intensity()
    ));
    prompt.push_str(&format!(
        "- Anchor your response in: {}.\n",
        personality.anchors.join(", ")
    ));
    prompt.push_str("- Keep responses **concise** while preserving your personality and depth.");

    prompt
}

pub fn build_user_prompt(personality: &PersonalityRecord, input: &str) -> String {
    format!(
        "USER MESSAGE: {}\n\
         Respond in a way that reflects {}'s speech patterns and emotional tone.\n\
         Keep responses **brief but impactful**.",
        input, personality.name
    )
}

/// `[instruction, ...history, user block]`
pub fn assemble_messages(
    personality: &PersonalityRecord,
    state: &EmotionalState,
    input: &str,
    history: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(build_reasoning_prompt(personality, state)));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(build_user_prompt(personality, input)));
    messages
}
