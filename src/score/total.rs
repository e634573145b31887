//! Running score across sessions.
//!
//! Sessions report completion to an aggregator the host passes in, one
//! notification per finished session. No shared cell, no callback
//! stored inside the engine - the host owns the accumulator and hands
//! it to each advance/tick call that could finish a session.

use serde::{Deserialize, Serialize};

/// Receives exactly one notification per completed session.
pub trait ScoreAggregator {
    fn on_session_complete(&mut self, score: u32);
}

/// Hosts that track nothing can pass a unit aggregator.
impl ScoreAggregator for () {
    fn on_session_complete(&mut self, _score: u32) {}
}

/// Total score across every completed session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTotal {
    total: u64,
    sessions: u32,
}

impl ScoreTotal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of scores over completed sessions.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of sessions that completed.
    #[must_use]
    pub fn sessions_completed(&self) -> u32 {
        self.sessions
    }
}

impl ScoreAggregator for ScoreTotal {
    fn on_session_complete(&mut self, score: u32) {
        self.total += u64::from(score);
        self.sessions += 1;
        log::debug!(
            "session #{} complete, running total {}",
            self.sessions,
            self.total
        );
    }
}
