//! Failure kinds surfaced by the contact use cases.
//!
//! The `Display` text of each variant is the public message clients see, so
//! keep it stable. Transport status codes are chosen by the inbound adapter.

use super::ports::ContactRepositoryError;
use super::FieldErrors;

/// Errors returned by contact commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// One or more fields failed validation.
    #[error("Validation failed")]
    Validation(FieldErrors),
    /// The store rejected the row as malformed.
    #[error("Invalid data format")]
    InvalidData,
    /// Another contact already uses this email address.
    #[error("A contact with this email already exists")]
    DuplicateEmail,
    /// The identifier is not a positive integer.
    #[error("Invalid contact ID")]
    InvalidId,
    /// No contact has the requested identifier.
    #[error("Contact not found")]
    NotFound,
    /// The store could not be reached.
    #[error("Contact store is unavailable")]
    Unavailable {
        /// Diagnostic detail; never shown to production clients.
        detail: String,
    },
    /// Any other store failure.
    #[error("Internal server error")]
    Unexpected {
        /// Diagnostic detail; never shown to production clients.
        detail: String,
    },
}

impl ContactError {
    /// Diagnostic detail carried by infrastructure failures.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unavailable { detail } | Self::Unexpected { detail } => Some(detail),
            _ => None,
        }
    }
}

impl From<ContactRepositoryError> for ContactError {
    fn from(err: ContactRepositoryError) -> Self {
        match err {
            ContactRepositoryError::DuplicateEmail { .. } => Self::DuplicateEmail,
            ContactRepositoryError::CheckViolation { .. } => Self::InvalidData,
            ContactRepositoryError::Connection { .. } => Self::Unavailable {
                detail: err.to_string(),
            },
            ContactRepositoryError::Query { .. } => Self::Unexpected {
                detail: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ContactRepositoryError::duplicate_email("a@b.co"), ContactError::DuplicateEmail)]
    #[case(ContactRepositoryError::check_violation("phone"), ContactError::InvalidData)]
    fn constraint_failures_map_to_client_errors(
        #[case] source: ContactRepositoryError,
        #[case] expected: ContactError,
    ) {
        assert_eq!(ContactError::from(source), expected);
    }

    #[test]
    fn connection_failures_are_unavailable_with_detail() {
        let err = ContactError::from(ContactRepositoryError::connection("pool timed out"));
        assert!(matches!(err, ContactError::Unavailable { .. }));
        assert_eq!(
            err.detail(),
            Some("contact repository connection failed: pool timed out")
        );
    }

    #[test]
    fn query_failures_are_unexpected() {
        let err = ContactError::from(ContactRepositoryError::query("syntax"));
        assert!(matches!(err, ContactError::Unexpected { .. }));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
