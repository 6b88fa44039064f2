//! # UI Blocker
//!
//! Single-slot gate around state-changing actions. The gate stays
//! closed for at least `lower_limit` after `block()` so fast responses
//! do not flicker, and reports itself open again after `upper_limit`
//! so a hung request cannot lock the board forever. The underlying
//! request is never cancelled; only the input lock lapses.

use std::time::Duration;

use tokio::time::Instant;

/// Default minimum hold, matching the board's flicker threshold
pub const LOWER_LIMIT: Duration = Duration::from_millis(350);

/// Default timeout after which input is accepted again
pub const UPPER_LIMIT: Duration = Duration::from_millis(1000);

/// Min/max delay guard for the action dispatch choke-point
#[derive(Debug)]
pub struct UiBlocker {
    lower_limit: Duration,
    upper_limit: Duration,
    blocked_at: Option<Instant>,
}

impl UiBlocker {
    pub fn new(lower_limit: Duration, upper_limit: Duration) -> Self {
        Self {
            lower_limit,
            upper_limit,
            blocked_at: None,
        }
    }

    /// Close the gate and start the delay window
    pub fn block(&mut self) {
        self.blocked_at = Some(Instant::now());
    }

    /// Open the gate, waiting out the remainder of the minimum window
    /// if the action finished faster than `lower_limit`.
    pub async fn unblock(&mut self) {
        if let Some(blocked_at) = self.blocked_at.take() {
            let elapsed = blocked_at.elapsed();
            if elapsed < self.lower_limit {
                tokio::time::sleep(self.lower_limit - elapsed).await;
            }
        }
    }

    /// Whether input should still be dropped.
    ///
    /// Lapses to `false` once `upper_limit` has passed since `block()`,
    /// even if `unblock()` was never called.
    pub fn is_blocked(&self) -> bool {
        match self.blocked_at {
            Some(blocked_at) => blocked_at.elapsed() < self.upper_limit,
            None => false,
        }
    }
}

impl Default for UiBlocker {
    fn default() -> Self {
        Self::new(LOWER_LIMIT, UPPER_LIMIT)
    }
}
