//! # World Error Types
//!
//! Generation, placement and streaming are total and never fail.
//! The only fallible surface is loading and validating configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a world from configuration.
#[derive(Error, Debug)]
pub enum WorldError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for `WorldConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but describes an unusable world.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl WorldError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for world configuration operations.
pub type WorldResult<T> = Result<T, WorldError>;
