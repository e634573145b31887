//! The round state machine and its variants.
//!
//! [`Session`] is the standard fixed-length run: N questions, one shot
//! each, optional answer timer. [`DoorSession`] is the retry variant
//! used by the maze: doors pose questions from a cycling pool until
//! they open. Both share the same round and history types.

pub mod doors;
pub mod round;
pub mod session;
pub mod timing;

pub use doors::{DoorOutcome, DoorSession, DOOR_FEEDBACK_PAUSE, DOOR_POOL_MIN};
pub use round::{AnswerRecord, Feedback, RoundSeq, RoundState};
pub use session::{
    EngineError, IgnoreReason, Progress, Session, SessionStatus, Submission, TickEvent,
};
pub use timing::Countdown;
