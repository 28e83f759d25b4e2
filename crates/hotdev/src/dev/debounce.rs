//! Per-file rate limiting of change notifications.
//!
//! This is not a batching buffer: a suppressed event is dropped for good.
//! Editors typically produce several events for a single save (truncate,
//! write, metadata update) within a few milliseconds; only the first one
//! reaches the browsers.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum time between two accepted notifications for the same file.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Outcome of [`Debouncer::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Suppress,
}

/// Ledger of the last accepted notification per filename.
///
/// Entries never expire; the ledger grows with the number of distinct files
/// touched during a session.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: HashMap<String, Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: HashMap::new(),
        }
    }

    /// Decide whether a notification for `filename` at `now` goes through.
    ///
    /// Accepting records `now` for `filename`; suppressing leaves the ledger
    /// untouched, so a steady stream of events still gets one notification
    /// per window.
    pub fn check(&mut self, filename: &str, now: Instant) -> Decision {
        if let Some(last) = self.last_accepted.get(filename) {
            if now.saturating_duration_since(*last) < self.window {
                return Decision::Suppress;
            }
        }

        self.last_accepted.insert(filename.to_string(), now);
        Decision::Accept
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}
