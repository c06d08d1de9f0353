//! Create-request validation for contacts.
//!
//! [`validate_contact`] is a pure function: it checks every field in one
//! pass and either returns a normalised [`NewContact`] or a [`FieldErrors`]
//! map with one message per offending field. The first failing rule for a
//! field wins.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum name length in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum name length in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum email length in characters, after trimming.
pub const EMAIL_MAX_CHARS: usize = 255;
/// Required number of phone digits.
pub const PHONE_DIGITS: usize = 10;

/// Fields of a contact create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable validation messages keyed by field.
///
/// Serialises as a flat JSON object, e.g. `{"name": "Name is required"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, String>);

impl FieldErrors {
    /// Record `message` for `field`, keeping any message already present.
    pub fn insert(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields that failed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Raw create input as received from a client.
///
/// Fields are optional so that a missing key is reported as a validation
/// failure for that field instead of a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactDraft {
    /// Convenience constructor for fully populated drafts.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }
}

/// Validated and normalised create input.
///
/// Only [`validate_contact`] constructs this type, so holding one proves the
/// name is trimmed and within bounds, the email is trimmed, lower-case and
/// well formed, and the phone is exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    email: String,
    phone: String,
}

impl NewContact {
    /// Trimmed display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed, lower-cased email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Ten-digit phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part, one `@`, then at least two non-empty dot-separated labels.
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn check_name(raw: Option<&str>) -> Result<String, &'static str> {
    let name = raw.map(str::trim).unwrap_or_default();
    let length = name.chars().count();
    if length == 0 {
        return Err("Name is required");
    }
    if length < NAME_MIN_CHARS {
        return Err("Name must be at least 2 characters long");
    }
    if length > NAME_MAX_CHARS {
        return Err("Name must not exceed 100 characters");
    }
    Ok(name.to_owned())
}

fn check_email(raw: Option<&str>) -> Result<String, &'static str> {
    let email = raw.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err("Email is required");
    }
    // Lowercasing can lengthen a string, so measure what gets stored.
    let email = email.to_lowercase();
    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err("Email must not exceed 255 characters");
    }
    if !email_regex().is_match(&email) {
        return Err("Please enter a valid email address");
    }
    Ok(email)
}

fn check_phone(raw: Option<&str>) -> Result<String, &'static str> {
    let phone = raw.unwrap_or_default();
    if phone.is_empty() {
        return Err("Phone number is required");
    }
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err("Please enter a valid 10-digit phone number");
    }
    Ok(phone.to_owned())
}

/// Validate and normalise a create request.
///
/// # Examples
/// ```
/// use contacts_backend::domain::{ContactDraft, ContactField, validate_contact};
///
/// let contact = validate_contact(&ContactDraft::new(" Jo ", "JO@X.com", "5551234567"))
///     .expect("valid draft");
/// assert_eq!(contact.name(), "Jo");
/// assert_eq!(contact.email(), "jo@x.com");
///
/// let errors = validate_contact(&ContactDraft::new("A", "nope", "123"))
///     .expect_err("invalid draft");
/// assert_eq!(errors.len(), 3);
/// assert_eq!(
///     errors.get(ContactField::Name),
///     Some("Name must be at least 2 characters long")
/// );
/// ```
pub fn validate_contact(draft: &ContactDraft) -> Result<NewContact, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = check_name(draft.name.as_deref())
        .map_err(|message| errors.insert(ContactField::Name, message))
        .ok();
    let email = check_email(draft.email.as_deref())
        .map_err(|message| errors.insert(ContactField::Email, message))
        .ok();
    let phone = check_phone(draft.phone.as_deref())
        .map_err(|message| errors.insert(ContactField::Phone, message))
        .ok();

    match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) => Ok(NewContact { name, email, phone }),
        _ => Err(errors),
    }
}
