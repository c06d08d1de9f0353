//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Contact records. `email` carries the `contacts_email_key` unique
    /// constraint and `updated_at` is maintained by a trigger.
    contacts (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
