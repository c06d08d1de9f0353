//! Typed client and view state for the contact book API.
//!
//! [`HttpContactsClient`] talks to the server; [`ContactBook`] and
//! [`ContactForm`] hold what a UI renders: the current page of contacts,
//! the add-contact form and their error banners. [`visible_pages`] computes
//! the pagination bar and [`format_phone`] renders stored numbers.
//!
//! ```no_run
//! use contacts_client::{ContactBook, ContactForm, FormField, HttpContactsClient};
//!
//! # async fn run() -> Result<(), contacts_client::ClientError> {
//! let mut book = ContactBook::new(HttpContactsClient::localhost()?);
//! book.fetch(1).await;
//!
//! let mut form = ContactForm::new();
//! form.edit(FormField::Name, "Jo Bloggs");
//! form.edit(FormField::Email, "jo@example.com");
//! form.edit(FormField::Phone, "555-123-4567");
//! book.add(&mut form).await;
//! # Ok(())
//! # }
//! ```

mod api;
mod book;
mod display;
mod error;
mod form;
mod http;
mod pages;
#[cfg(test)]
mod test_support;

pub use api::{Contact, ContactInput, ContactList, ContactsApi};
pub use book::{ContactBook, DELETE_FALLBACK, FETCH_FALLBACK};
pub use display::format_phone;
pub use error::{ClientError, ServerFieldErrors};
pub use form::{ContactForm, FormErrors, FormField, SUBMIT_FALLBACK, UnknownField, digits_only};
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpContactsClient};
pub use pages::{MAX_VISIBLE_PAGES, PageWindow, visible_pages};
