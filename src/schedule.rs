//! Cooperative scheduling primitives: per-frame coalescing and debouncing.
//!
//! Both are plain state machines driven by the caller. `FrameScheduler` is a
//! "run at most once per frame" flag: any number of requests between two
//! frames collapse into one run. `Debounce` is a "run after quiet period"
//! timer: each trigger pushes the deadline out, and it fires once the window
//! has elapsed without further triggers. Time is always passed in, so tests
//! simulate frames and clocks without sleeping.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// FrameScheduler
// ---------------------------------------------------------------------------

/// Coalesces update requests into at most one run per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a run on the next frame. Repeated requests are coalesced.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Whether a run is scheduled for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request at frame time. Returns `true` at most once
    /// per batch of requests.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

/// Trailing-edge debounce timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Create a debounce with the given quiet window.
    pub fn new(wait: Duration) -> Self {
        Self { wait, deadline: None }
    }

    /// Record a trigger at `now`, restarting the quiet window.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Fire if the quiet window has elapsed. Returns `true` exactly once per
    /// burst of triggers.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending trigger will fire, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop any pending trigger.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn frame_requests_coalesce() {
        let mut frame = FrameScheduler::new();
        assert!(!frame.take());

        frame.request();
        frame.request();
        frame.request();
        assert!(frame.is_pending());
        assert!(frame.take());
        assert!(!frame.take());
    }

    #[test]
    fn debounce_fires_after_quiet_window() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT);
        debounce.trigger(t0);

        assert!(!debounce.poll(t0 + ms(199)));
        assert!(debounce.poll(t0 + ms(200)));
        assert!(!debounce.poll(t0 + ms(400)));
    }

    #[test]
    fn debounce_restarts_on_each_trigger() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT);
        for step in 0..5 {
            debounce.trigger(t0 + ms(step * 100));
        }
        // Last trigger at 400ms; window ends at 600ms.
        assert!(!debounce.poll(t0 + ms(550)));
        assert_eq!(debounce.deadline(), Some(t0 + ms(600)));
        assert!(debounce.poll(t0 + ms(600)));
    }

    #[test]
    fn debounce_cancel() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT);
        debounce.trigger(t0);
        assert_eq!(debounce.deadline(), Some(t0 + WAIT));
        debounce.cancel();
        assert_eq!(debounce.deadline(), None);
        assert!(!debounce.poll(t0 + ms(1000)));
    }
}
