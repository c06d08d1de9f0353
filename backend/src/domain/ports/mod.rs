//! Domain ports.
//!
//! Driving ports (`ContactsCommand`, `ContactsQuery`) are what inbound
//! adapters call; driven ports (`ContactRepository`) are what outbound
//! adapters implement.

mod contact_repository;
mod contacts_command;
mod contacts_query;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactPage, ContactRepository, ContactRepositoryError};
pub use contacts_command::ContactsCommand;
pub use contacts_query::ContactsQuery;
