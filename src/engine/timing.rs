//! Countdown bookkeeping for timed rounds and feedback pauses.
//!
//! The engine owns no clock. Timers are plain data: the host reports
//! elapsed wall time through `Session::tick`, and a `Countdown` answers
//! whether its deadline passed inside that slice. Dropping the session
//! (or replacing it for a new game) discards every armed countdown,
//! which is all the cancellation the engine needs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A one-shot countdown, decremented by reported elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Arm a countdown for the given duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Time left before the deadline.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Consume elapsed time. Returns `true` when the deadline fires,
    /// along with how much of the slice was left over after it.
    ///
    /// A fired countdown reads zero afterwards; elapsing it further is
    /// harmless.
    pub fn elapse(&mut self, elapsed: Duration) -> (bool, Duration) {
        if elapsed >= self.remaining {
            let leftover = elapsed - self.remaining;
            self.remaining = Duration::ZERO;
            (true, leftover)
        } else {
            self.remaining -= elapsed;
            (false, Duration::ZERO)
        }
    }

    /// Remaining whole seconds, rounded up - what a countdown display
    /// shows. A countdown at 0.2s still reads "1".
    #[must_use]
    pub fn remaining_secs_ceil(&self) -> u64 {
        let millis = self.remaining.as_millis() as u64;
        (millis + 999) / 1000
    }
}
