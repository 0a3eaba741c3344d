//! Error types for the hydro_core library.

use std::io;
use std::time::Duration;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hydro_core infrastructure (config, HTTP setup, IO)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Built-in food or workout table is inconsistent
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}

/// Failure of an external lookup (weather or food provider).
///
/// These never reach the user: the lookup boundary turns them into a
/// fallback temperature or a "not found" food result.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider disabled")]
    Disabled,
}

/// Rejected dialog input. Each variant maps to a re-prompt of the same step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("not a number")]
    NotANumber,

    #[error("out of range")]
    OutOfRange,

    #[error("unrecognized gender")]
    UnknownGender,

    #[error("empty input")]
    Empty,

    #[error("expected \"<type> <minutes>\"")]
    WorkoutFormat,
}
