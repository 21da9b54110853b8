//! Structured logging setup.
//!
//! The library only emits `tracing` events and spans; installing a subscriber
//! is up to the host. [`init_tracing`] installs the default one: an
//! `EnvFilter` plus a compact `fmt` layer on stderr.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # What gets logged
//!
//! - `debug_span!` around event handling and filter passes
//! - `debug!` for item additions, removals and collapse changes
//! - `warn!` for operations on unknown keys or groups, skipped records and a
//!   selection larger than `max_selectable_items`

mod init;

pub use init::{build_filter, init_tracing, DEFAULT_TRACE_LEVEL};
