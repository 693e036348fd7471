//! Retry state machine.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position of one operation in its retry lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    /// Accepted, no attempt yet
    Pending,
    /// Attempt `attempt` (1-based) in flight
    Running {
        /// Attempt number
        attempt: u32,
    },
    /// Attempt `attempt` failed; waiting `delay` before the next one
    Retrying {
        /// Attempt that failed
        attempt: u32,
        /// Backoff before the next attempt
        delay: Duration,
    },
    /// Attempt `attempts` succeeded
    Success {
        /// Attempts made
        attempts: u32,
    },
    /// Final attempt failed
    Failed {
        /// Attempts made
        attempts: u32,
    },
    /// Stopped by cancellation
    Cancelled {
        /// Attempts made
        attempts: u32,
    },
}

impl TaskState {
    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Success { .. } | TaskState::Failed { .. } | TaskState::Cancelled { .. }
        )
    }
}

/// Attempt counter and accumulated backoff for one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct RetryState {
    /// Attempts started so far
    attempts: u32,
    /// Total backoff scheduled so far
    cumulative_delay: Duration,
}

impl RetryState {
    /// Record the start of a new attempt, returning its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Record a scheduled backoff.
    pub fn add_delay(&mut self, delay: Duration) {
        self.cumulative_delay += delay;
    }
}
