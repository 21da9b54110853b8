//! Debounce for the delayed search hook.
//!
//! The host owns the actual timers. The debouncer hands out a fresh
//! [`TimerToken`] per input change and remembers only the newest one; when a
//! timer elapses the host reports its token back and only the newest token
//! fires. Each new schedule cancels the previous pending one.

use crate::domain::Item;
use std::time::Duration;

/// Delay between the last search input and the delayed hook.
pub const SEARCH_INPUT_DELAY: Duration = Duration::from_millis(200);

/// Identifier of a host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// A timer the host should start, and the one it may stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub delay: Duration,
    pub cancelled: Option<TimerToken>,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    token: TimerToken,
    query: String,
    selected: Vec<Item>,
}

/// Single-slot, last-write-wins debouncer.
#[derive(Debug, Clone, Default)]
pub struct SearchDebouncer {
    next_token: u64,
    pending: Option<PendingSearch>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending firing with a new one for `query`.
    ///
    /// `selected` is captured now, at input time, and handed to the hook when
    /// the timer elapses.
    pub fn schedule(&mut self, query: &str, selected: Vec<Item>) -> ScheduledTimer {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let cancelled = self.pending.take().map(|p| p.token);

        self.pending = Some(PendingSearch {
            token,
            query: query.to_string(),
            selected,
        });

        ScheduledTimer {
            token,
            delay: SEARCH_INPUT_DELAY,
            cancelled,
        }
    }

    /// Consumes the pending firing if `token` is the newest one.
    ///
    /// Stale tokens return `None` and leave the pending firing in place.
    pub fn fire(&mut self, token: TimerToken) -> Option<(String, Vec<Item>)> {
        if self.pending_token() != Some(token) {
            tracing::trace!(token = token.0, "ignoring stale search timer");
            return None;
        }

        self.pending.take().map(|pending| (pending.query, pending.selected))
    }

    #[must_use]
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|p| p.token)
    }
}
