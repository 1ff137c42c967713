use std::time::{Duration, Instant};

use serde::Serialize;

/// Handle for a delayed action. A token that is no longer pending is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerToken(pub(crate) u64);

/// Pending delayed actions, polled by the event loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<(TimerToken, Instant)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, token: TimerToken, now: Instant, after: Duration) {
        self.pending.retain(|(t, _)| *t != token);
        self.pending.push((token, now + after));
    }

    /// Returns `true` if the token was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != token);
        self.pending.len() != before
    }

    /// Removes and returns every token whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerToken> {
        let mut due = Vec::new();
        self.pending.retain(|(token, deadline)| {
            if *deadline <= now {
                due.push(*token);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, deadline)| *deadline).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
