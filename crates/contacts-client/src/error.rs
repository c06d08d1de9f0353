//! Client-side failure classification.

use std::collections::BTreeMap;

/// Field name to message map returned with validation failures.
pub type ServerFieldErrors = BTreeMap<String, String>;

/// Errors surfaced by [`crate::ContactsApi`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request did not complete within the client timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Transport detail.
        message: String,
    },
    /// The server could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Transport detail.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` from the error body, when present.
        message: Option<String>,
        /// `errors` from the error body, when present.
        errors: Option<ServerFieldErrors>,
    },
    /// A success response carried an unexpected body.
    #[error("could not decode response: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },
    /// The client was configured with an unusable base URL.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// What is wrong with the configuration.
        message: String,
    },
}

impl ClientError {
    /// Text for a user-facing banner: the server's message when it sent one,
    /// `fallback` otherwise.
    #[must_use]
    pub fn banner_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// Per-field validation messages sent by the server.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&ServerFieldErrors> {
        match self {
            Self::Api {
                errors: Some(errors),
                ..
            } => Some(errors),
            _ => None,
        }
    }
}
