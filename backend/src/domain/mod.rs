//! Domain entities, validation rules and use-case services.
//!
//! Nothing in this module depends on actix-web or Diesel; adapters reach it
//! through the traits in [`ports`].
//!
//! Public surface:
//! - [`Contact`] and [`ContactId`]: the persisted record and its key.
//! - [`validate_contact`]: the pure create-request validator.
//! - [`ContactService`]: implements [`ports::ContactsCommand`] and
//!   [`ports::ContactsQuery`].
//! - [`ContactError`]: failure kinds surfaced to inbound adapters.
//! - [`TraceId`]: request correlation identifier.

mod contact;
mod contact_error;
mod contact_service;
mod contact_validation;
pub mod ports;
mod trace_id;

pub use self::contact::{Contact, ContactId, ContactIdError};
pub use self::contact_error::ContactError;
pub use self::contact_service::ContactService;
pub use self::contact_validation::{
    ContactDraft, ContactField, EMAIL_MAX_CHARS, FieldErrors, NAME_MAX_CHARS, NAME_MIN_CHARS,
    NewContact, PHONE_DIGITS, validate_contact,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
