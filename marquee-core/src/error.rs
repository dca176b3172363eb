//! Error types for marquee-core.

use thiserror::Error;

/// Errors raised while building [`crate::Config`] from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable was unset or empty.
    #[error("missing required environment variable {key}")]
    Missing { key: &'static str },

    /// A variable was set but could not be interpreted.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The `.env` file named on the command line could not be loaded.
    #[error("failed to load env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
