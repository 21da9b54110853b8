//! Actions representing side effects to be executed by the host.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or timer events.
//! Actions bridge pure state transformations and effectful operations like
//! showing status messages or starting timers, which the host owns.
//!
//! # Example
//!
//! ```rust
//! use tickbox::app::Action;
//!
//! let actions = vec![Action::ShowStatus("No items available".to_string())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::notify::TimerToken;
use std::time::Duration;

/// Delay between marking an item for removal and committing the removal.
///
/// Matches the renderer's fade-out transition.
pub const REMOVAL_GRACE_PERIOD: Duration = Duration::from_millis(300);

/// Commands representing side effects to be executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the checklist UI.
    CloseFocus,

    /// Shows the status line with the given text (e.g. the empty-result message).
    ShowStatus(String),

    /// Hides the status line.
    HideStatus,

    /// Starts a one-shot timer.
    ///
    /// When it elapses the host sends `Event::TimerElapsed` with the same token.
    ScheduleTimer {
        /// Token to report back.
        token: TimerToken,
        /// Delay before the timer elapses.
        delay: Duration,
    },

    /// Stops a timer scheduled earlier.
    ///
    /// Hosts that cannot cancel timers may ignore this: stale tokens are
    /// discarded when they come back.
    CancelTimer {
        /// Token of the timer to stop.
        token: TimerToken,
    },

    /// Starts the removal grace period for an item.
    ///
    /// The host fades the item out and sends `Event::CommitRemoval` once
    /// `delay` has passed.
    ScheduleRemoval {
        /// Key of the item being removed.
        key: String,
        /// Grace period length.
        delay: Duration,
    },
}
