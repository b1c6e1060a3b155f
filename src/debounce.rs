//! Host-driven debouncing of search input.
//!
//! The engine holds no timers. A host forwards each keystroke with the current
//! instant and polls on its own tick; the term becomes active only after it has
//! been stable for the quiet period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
    applied: String,
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            applied: String::new(),
        }
    }

    /// Records a new term, discarding any pending one and restarting the window.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// Returns the newly applied term once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let ready = matches!(
            &self.pending,
            Some((_, at)) if now.saturating_duration_since(*at) >= self.quiet_period
        );
        if !ready {
            return None;
        }
        let (term, _) = self.pending.take()?;
        if term == self.applied {
            return None;
        }
        self.applied = term;
        Some(self.applied.as_str())
    }

    /// Term currently in effect for filtering.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
