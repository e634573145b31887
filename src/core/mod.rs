//! Core types: questions, configuration, RNG.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games configure the engine via `RoundConfig` rather
//! than modifying the core.

pub mod config;
pub mod question;
pub mod rng;

pub use config::{
    InputMode, RoundConfig, ANSWER_TIMER, FEEDBACK_PAUSE, ROUNDS_PER_SESSION,
};
pub use question::{Question, QuestionError, RawQuestion, BLANK_MARKER};
pub use rng::SessionRng;
