use std::time::Duration;
use tokio::time::Instant;

use crate::domain::errors::{DeliveryError, DeliveryResult};

/// Deadline carried from an inbound request into every store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    deadline: Instant,
}

impl QueryContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, `None` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .checked_duration_since(Instant::now())
            .filter(|remaining| !remaining.is_zero())
    }

    /// `DeadlineExceeded` once the deadline has passed. Called as the last
    /// step of a transaction so late work rolls back instead of committing.
    pub fn ensure_time_left(&self) -> DeliveryResult<()> {
        self.remaining()
            .map(|_| ())
            .ok_or(DeliveryError::DeadlineExceeded)
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }
}
