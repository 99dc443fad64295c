use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{self, Instant};
use tracing::debug;

/// Minimum spacing between consecutive outbound API calls.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Enforces a minimum interval between consecutive dispatches.
///
/// A caller claims the next dispatch slot under the mutex: the slot is
/// `max(now, previous_slot + MIN_REQUEST_INTERVAL)`, and the shared
/// timestamp is advanced to that slot before the caller starts waiting.
/// Overlapping callers therefore serialize in claim order, each spaced at
/// least one interval apart, and callers arriving after a quiet period
/// proceed immediately.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Wait for the next dispatch slot and return its timestamp.
    pub async fn acquire(&self) -> Instant {
        let scheduled = {
            let mut last = self.last_dispatch.lock().await;
            let now = Instant::now();
            let scheduled = match *last {
                Some(previous) => now.max(previous + self.min_interval),
                None => now,
            };
            *last = Some(scheduled);
            scheduled
        };

        let wait = scheduled.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            debug!("Rate limit: waiting {:?} before dispatch", wait);
            time::sleep_until(scheduled).await;
        }
        scheduled
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MIN_REQUEST_INTERVAL)
    }
}
