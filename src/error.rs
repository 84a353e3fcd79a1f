use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dog-watcher
#[derive(Debug, Error)]
pub enum WatcherError {
    /// Terminal initialization or operation failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Configuration parsing failed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file is invalid
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Transport-level failure talking to the server
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Liveness check failed
    #[error("Stardog server at {server} is not alive")]
    NotAlive { server: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument}")]
    InvalidArgument { argument: String },
}

impl WatcherError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        WatcherError::Config {
            message: message.into(),
        }
    }

    /// Create a config invalid error
    pub fn config_invalid(path: PathBuf, reason: impl Into<String>) -> Self {
        WatcherError::ConfigInvalid {
            path,
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn http(message: impl Into<String>) -> Self {
        WatcherError::Http {
            message: message.into(),
        }
    }

    /// Create an API status error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        WatcherError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a not-alive error
    pub fn not_alive(server: impl Into<String>) -> Self {
        WatcherError::NotAlive {
            server: server.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>) -> Self {
        WatcherError::InvalidArgument {
            argument: argument.into(),
        }
    }
}

/// Result type alias for dog-watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;

impl From<reqwest::Error> for WatcherError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return WatcherError::api(status.as_u16(), err.to_string());
        }
        WatcherError::http(err.to_string())
    }
}

impl From<serde_json::Error> for WatcherError {
    fn from(err: serde_json::Error) -> Self {
        WatcherError::Http {
            message: format!("malformed response: {err}"),
        }
    }
}
