//! Add-contact form state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::api::{Contact, ContactInput, ContactsApi};

/// Banner text when a create fails without a server message.
pub const SUBMIT_FALLBACK: &str = "Failed to add contact. Please try again.";

const NAME_MIN_CHARS: usize = 2;
const PHONE_DIGITS: usize = 10;

/// An editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

impl FormField {
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

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a server error names an unknown field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(UnknownField(other.to_owned())),
        }
    }
}

/// Per-field messages shown under the inputs.
pub type FormErrors = BTreeMap<FormField, String>;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email pattern should compile: {error}"))
    })
}

/// Keep only ASCII digits.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Values, errors and banner of the add-contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    errors: FormErrors,
    submit_error: Option<String>,
    submitting: bool,
}

impl ContactForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    /// Message shown under `field`, if any.
    #[must_use]
    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Every field message.
    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Banner shown above the form after a failed submit.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Whether a submit is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Store `value` for `field`. Typing clears that field's message and the
    /// banner.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
        };
        *slot = value.into();
        self.errors.remove(&field);
        self.submit_error = None;
    }

    /// Check the current values without touching form state.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Name is required".to_owned());
        } else if name.chars().count() < NAME_MIN_CHARS {
            errors.insert(
                FormField::Name,
                "Name must be at least 2 characters".to_owned(),
            );
        }

        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, "Email is required".to_owned());
        } else if !email_regex().is_match(&self.email) {
            errors.insert(
                FormField::Email,
                "Please enter a valid email address".to_owned(),
            );
        }

        if self.phone.trim().is_empty() {
            errors.insert(FormField::Phone, "Phone number is required".to_owned());
        } else if digits_only(&self.phone).len() != PHONE_DIGITS {
            errors.insert(
                FormField::Phone,
                "Please enter a valid 10-digit phone number".to_owned(),
            );
        }

        errors
    }

    /// Request body for the current values, phone reduced to digits.
    #[must_use]
    pub fn input(&self) -> ContactInput {
        ContactInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: digits_only(&self.phone),
        }
    }

    /// Validate and, when clean, create the contact through `api`.
    ///
    /// Returns the created contact and resets the form on success. Local
    /// validation failures never reach the server. A server `errors` map
    /// becomes field messages; any other failure sets the banner.
    pub async fn submit<A>(&mut self, api: &A) -> Option<Contact>
    where
        A: ContactsApi + ?Sized,
    {
        let local = self.validate();
        if !local.is_empty() {
            debug!(fields = local.len(), "form rejected before submit");
            self.errors = local;
            return None;
        }

        self.submitting = true;
        self.errors.clear();
        self.submit_error = None;

        let outcome = api.create_contact(&self.input()).await;
        self.submitting = false;
        match outcome {
            Ok(contact) => {
                *self = Self::default();
                Some(contact)
            }
            Err(err) => {
                let from_server: FormErrors = err
                    .field_errors()
                    .into_iter()
                    .flatten()
                    .filter_map(|(field, message)| {
                        field.parse().ok().map(|parsed| (parsed, message.clone()))
                    })
                    .collect();
                if from_server.is_empty() {
                    self.submit_error = Some(err.banner_message(SUBMIT_FALLBACK));
                } else {
                    self.errors = from_server;
                }
                None
            }
        }
    }
}
