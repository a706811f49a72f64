//! CLI error types.
//!
//! Every error here is fatal: it is reported on standard error before the
//! timer starts and mapped to a process exit code.

use thiserror::Error;

use crate::types::ConfigError;

/// Errors produced while turning command-line input into a configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// Help, version or usage text was requested or required.
    #[error("{0}")]
    Usage(String),

    /// A flag could not be parsed.
    #[error("{0}")]
    InvalidFlag(String),

    /// A duration literal could not be parsed.
    #[error("invalid duration \"{value}\": {reason}")]
    InvalidDuration {
        /// The offending literal
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Parsed values do not form a valid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 0,
            Self::InvalidFlag(_) | Self::InvalidDuration { .. } | Self::Config(_) => 1,
        }
    }

    /// Returns true when the message is usage text rather than a diagnostic.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
