//! Persisted contact entity and its identifier.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors raised by [`ContactId`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactIdError {
    /// The raw value is not a base-10 integer.
    #[error("contact id must be a positive integer, got {raw:?}")]
    NotNumeric { raw: String },
    /// The value is zero or negative.
    #[error("contact id must be positive, got {value}")]
    NotPositive { value: i64 },
}

/// Store-assigned contact identifier.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ContactId(i64);

impl ContactId {
    /// Wrap a store identifier.
    pub fn new(value: i64) -> Result<Self, ContactIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(ContactIdError::NotPositive { value })
        }
    }

    /// Parse a path segment.
    ///
    /// Only plain ASCII digits are accepted; signs, whitespace and trailing
    /// characters are rejected.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::domain::ContactId;
    ///
    /// assert_eq!(ContactId::parse("42").map(ContactId::get), Ok(42));
    /// assert!(ContactId::parse("0").is_err());
    /// assert!(ContactId::parse("12abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ContactIdError> {
        let not_numeric = || ContactIdError::NotNumeric {
            raw: raw.to_owned(),
        };
        if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(not_numeric());
        }
        let value = raw.parse::<i64>().map_err(|_| not_numeric())?;
        Self::new(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for ContactId {
    type Error = ContactIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactId> for i64 {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

/// A stored contact record.
///
/// Rows are only ever created through the contact service, so `name`,
/// `email` and `phone` already satisfy the validator's rules. `email` is
/// lower-case and unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("007", 7)]
    #[case("9223372036854775807", i64::MAX)]
    fn parse_accepts_positive_digits(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(ContactId::parse(raw).map(ContactId::get), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("-3")]
    #[case("+3")]
    #[case(" 3")]
    #[case("3.0")]
    #[case("12abc")]
    #[case("9223372036854775808")]
    fn parse_rejects_non_numeric_input(#[case] raw: &str) {
        assert_eq!(
            ContactId::parse(raw),
            Err(ContactIdError::NotNumeric {
                raw: raw.to_owned()
            })
        );
    }

    #[rstest]
    #[case("0")]
    #[case("0000")]
    fn parse_rejects_zero(#[case] raw: &str) {
        assert_eq!(
            ContactId::parse(raw),
            Err(ContactIdError::NotPositive { value: 0 })
        );
    }

    #[test]
    fn serde_uses_plain_integers() {
        let id = ContactId::new(12).expect("positive id");
        assert_eq!(serde_json::to_string(&id).expect("serialise"), "12");
        let err = serde_json::from_str::<ContactId>("-1");
        assert!(err.is_err());
    }
}
