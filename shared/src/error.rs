//! Error types for the food menu clients and controllers.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the data service or the model endpoint.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport error (connect, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Http(reqwest::Error),

    /// The remote service answered with an error object
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The model answered without any text
    #[error("Empty reply from model: {0}")]
    EmptyReply(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // URLs may carry credentials; keep them out of messages and logs.
        Error::Http(e.without_url())
    }
}

impl Error {
    /// Build a service error from a status code and message.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Error::Service {
            status,
            message: message.into(),
        }
    }
}
