// src/persona/mod.rs
// Personality definitions and the store they are loaded from.

pub mod record;
pub mod store;

pub use record::PersonalityRecord;
pub use store::PersonalityStore;
