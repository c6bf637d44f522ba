//! Calculator core: input classification, the two-phase state machine and
//! the structured history it produces.
//!
//! Everything in here is synchronous and side-effect free. Remote
//! computation and persistence live behind the seams in
//! [`crate::backend`] and [`crate::storage`].

pub mod history;
pub mod input;
pub mod machine;
mod operations;

pub use operations::{Operation, Operator};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised by the collaborators around the state machine.
///
/// None of these cross the [`crate::Session`] boundary: the session logs
/// them and degrades to "no visible change".
#[derive(Debug, Error)]
pub enum CalcError {
    /// I/O error from durable storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or received JSON could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport failure talking to the compute endpoint
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Compute endpoint answered with a non-success status
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Compute endpoint answered with a body we cannot read a result from
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Storage backend failure other than plain I/O
    #[error("Storage error: {message}")]
    Storage {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CalcError {
    /// Create a storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
