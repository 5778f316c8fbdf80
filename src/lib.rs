// src/lib.rs

pub mod cli;
pub mod config;
pub mod emotion;
pub mod error;
pub mod heuristics;
pub mod llm;
pub mod persona;
pub mod session;

pub use error::{PersonaError, ProviderError};
pub use session::{ChatController, ReplySource, Session, TurnOutcome};
