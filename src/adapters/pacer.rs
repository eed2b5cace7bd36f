//! Per-provider request spacing.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Enforces a minimum interval before each request of one provider.
///
/// The first request waits the full interval too, so a single lookup is
/// still spaced from whatever preceded it. Each provider owns its pacer;
/// nothing is shared across providers.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_request: Mutex::new(None) }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Block until the minimum interval has passed since the previous
    /// request, or for the whole interval before the first one.
    pub fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().unwrap_or_else(PoisonError::into_inner);
        let remaining = match *last {
            Some(previous) => self.min_interval.saturating_sub(previous.elapsed()),
            None => self.min_interval,
        };
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        *last = Some(Instant::now());
    }
}
