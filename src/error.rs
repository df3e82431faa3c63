//! Error types for usbipd.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::selector::SelectorOption;
use crate::types::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// Selector validation errors. All of these are raised before any backend
/// call is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("exactly one of --all, --busid or --hardware-id is required")]
    MissingSelector,

    #[error("option '{0}' cannot be used with '{1}'")]
    ConflictingSelectors(SelectorOption, SelectorOption),

    #[error("option '{option}' does not take an argument, got '{value}'")]
    UnexpectedArgument { option: SelectorOption, value: String },

    #[error("option '{0}' requires an argument")]
    MissingArgument(SelectorOption),

    #[error("invalid argument '{value}' for option '{option}': {source}")]
    InvalidArgument {
        option: SelectorOption,
        value: String,
        #[source]
        source: FormatError,
    },

    #[error("unrecognized argument '{0}'")]
    StrayArgument(String),
}

/// Errors reported by a detach backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend ran but the detach did not logically succeed.
    #[error("{0}")]
    Failed(String),

    /// The backend observed cancellation and unwound.
    #[error("operation canceled")]
    Canceled,

    /// Unexpected backend defect; never folded into [`BackendError::Failed`].
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal errors that end a command without an exit-status translation.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("backend failure: {0:#}")]
    Backend(anyhow::Error),
}

/// Result type alias for command execution.
pub type CliResult<T> = Result<T, CliError>;
