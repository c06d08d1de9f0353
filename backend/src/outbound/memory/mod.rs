//! In-memory adapters for running without PostgreSQL.

mod in_memory_contact_repository;

pub use in_memory_contact_repository::InMemoryContactRepository;
