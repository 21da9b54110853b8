//! Error types for the checklist engine.
//!
//! This module defines the centralized error type [`TickboxError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only construction problems and malformed input shapes are errors. Runtime
//! anomalies such as toggling an unknown key degrade to logged no-ops and never
//! reach this type.

use thiserror::Error;

/// The main error type for checklist operations.
///
/// # Examples
///
/// ```
/// use tickbox::TickboxError;
///
/// fn validate_states(states: &[i64]) -> Result<(), TickboxError> {
///     if states.len() < 2 {
///         return Err(TickboxError::Config("at least two states are required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_states(&[0]).is_err());
/// ```
#[derive(Debug, Error)]
pub enum TickboxError {
    /// Configuration is invalid.
    ///
    /// Raised at construction time, e.g. fewer than two distinct states or an
    /// empty field name in the field map.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bulk item input was not a sequence of records.
    #[error("Invalid items format: {0}")]
    InvalidItems(String),

    /// A single item input was not a record.
    #[error("Invalid item format: {0}")]
    InvalidItem(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for checklist operations.
pub type Result<T> = std::result::Result<T, TickboxError>;
