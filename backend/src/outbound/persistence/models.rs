//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::ContactRepositoryError;
use crate::domain::{Contact, ContactId, NewContact};

use super::schema::contacts;

/// Row read from `contacts`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactRepositoryError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let id = ContactId::new(row.id).map_err(|err| {
            ContactRepositoryError::query(format!("invalid contact id in database: {err}"))
        })?;
        Ok(Self {
            id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable row; the store assigns `id` and both timestamps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

impl<'a> From<&'a NewContact> for NewContactRow<'a> {
    fn from(contact: &'a NewContact) -> Self {
        Self {
            name: contact.name(),
            email: contact.email(),
            phone: contact.phone(),
        }
    }
}
