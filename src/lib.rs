//! # grammar-rounds
//!
//! A quiz round engine for grammar learning mini-games.
//!
//! ## Design Principles
//!
//! 1. **One engine, many games**: No per-game state machines. Every mode
//!    is the same [`engine::Session`] under a different
//!    [`core::RoundConfig`] plus, where needed, a thin input adapter.
//!
//! 2. **Ignored, not errored**: Player input that arrives late, twice,
//!    or against a stale round is dropped with a reason, never an error.
//!    Errors are reserved for content problems.
//!
//! 3. **The host owns the clock**: Timers are session data, driven by
//!    reported elapsed time. Dropping a session cancels everything it
//!    had armed.
//!
//! ## Architecture
//!
//! - **Deterministic randomness**: One master `SessionRng` forked per
//!   session; tests replay exact deals from a seed.
//!
//! - **Persistent history**: Answer records in an `im` vector, so
//!   sessions clone cheaply for host-side snapshots.
//!
//! - **Exactly-once completion**: The report is produced at the
//!   `InProgress` to `Complete` transition and never again; score
//!   aggregation is explicit message passing, not a shared cell.
//!
//! ## Modules
//!
//! - `core`: Questions, round configuration, RNG
//! - `engine`: The round state machine, timing, the door variant
//! - `score`: Session reports and cross-session totals
//! - `supply`: The question source seam and wire decoding
//! - `flow`: The loading / failed / playing / summary lifecycle
//! - `modes`: The six shipped games configured on top of the engine

pub mod core;
pub mod engine;
pub mod flow;
pub mod modes;
pub mod score;
pub mod supply;

// Re-export commonly used types
pub use crate::core::{
    InputMode, Question, QuestionError, RawQuestion, RoundConfig, SessionRng, BLANK_MARKER,
};

pub use crate::engine::{
    AnswerRecord, DoorOutcome, DoorSession, EngineError, Feedback, IgnoreReason, Progress,
    RoundSeq, RoundState, Session, SessionStatus, Submission, TickEvent,
};

pub use crate::score::{ScoreAggregator, ScoreTotal, SessionReport};

pub use crate::supply::{decode_batch, QuestionSupplier, ScriptedSupplier, SupplyError};

pub use crate::flow::{FlowError, FlowState, GameFlow, MazeFlow, MazeFlowState};

pub use crate::modes::GameMode;
