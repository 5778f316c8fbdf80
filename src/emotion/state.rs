// src/emotion/state.rs

use std::fmt;

pub const MIN_INTENSITY: u8 = 0;
pub const MAX_INTENSITY: u8 = 10;

/// Current mood of the active personality: a free-form label plus an
/// intensity that always stays within `MIN_INTENSITY..=MAX_INTENSITY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionalState {
    pub emotion: String,
    intensity: u8,
}

impl EmotionalState {
    pub fn new(emotion: impl Into<String>, intensity: i64) -> Self {
        Self {
            emotion: emotion.into(),
            intensity: clamp_intensity(intensity),
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Shift intensity by `delta`, clamping the result.
    pub fn adjust(&mut self, delta: i32) {
        self.intensity = clamp_intensity(i64::from(self.intensity) + i64::from(delta));
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Intensity: {})", self.emotion, self.intensity)
    }
}

fn clamp_intensity(value: i64) -> u8 {
    value.clamp(i64::from(MIN_INTENSITY), i64::from(MAX_INTENSITY)) as u8
}
