//! PostgreSQL-backed `ContactRepository` using Diesel.
//!
//! Constraint failures are classified from the driver's structured
//! `DatabaseErrorKind`, never from message text.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{ContactPage, ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, NewContact};

use super::models::{ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel implementation of the [`ContactRepository`] port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    ContactRepositoryError::connection(error.message())
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                constraint = info.constraint_name(),
                message = info.message(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

fn map_diesel_error(error: DieselError) -> ContactRepositoryError {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            ContactRepositoryError::check_violation(
                info.constraint_name().unwrap_or("unnamed constraint"),
            )
        }
        DieselError::QueryBuilderError(_) => ContactRepositoryError::query("database query error"),
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Map an insert failure. The identity key is always generated, so the only
/// unique constraint an insert can hit is the one on `email`.
fn map_insert_error(error: DieselError, email: &str) -> ContactRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
            debug!(constraint = info.constraint_name(), "contact email already stored");
            ContactRepositoryError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn find_id_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ContactId>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<i64> = contacts::table
            .filter(contacts::email.eq(email))
            .select(contacts::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        id.map(ContactId::new).transpose().map_err(|err| {
            ContactRepositoryError::query(format!("invalid contact id in database: {err}"))
        })
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(NewContactRow::from(contact))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, contact.email()))?;

        Contact::try_from(row)
    }

    async fn list_page(&self, request: PageRequest) -> Result<ContactPage, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = to_sql_bound(request.limit());
        let offset = to_sql_bound(request.offset());

        // Count and page must come from one snapshot.
        let (rows, total) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(move |conn| {
                async move {
                    let total: i64 = contacts::table.count().get_result(conn).await?;
                    let rows: Vec<ContactRow> = contacts::table
                        .select(ContactRow::as_select())
                        .order((contacts::created_at.desc(), contacts::id.desc()))
                        .limit(limit)
                        .offset(offset)
                        .load(conn)
                        .await?;
                    Ok::<_, DieselError>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| ContactRepositoryError::query("negative row count"))?;
        let contacts = rows
            .into_iter()
            .map(Contact::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContactPage { contacts, total })
    }

    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(contacts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(String::from("driver detail")))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ContactRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn unique_violation_on_insert_is_a_duplicate_email() {
        let err = map_insert_error(
            database_error(DatabaseErrorKind::UniqueViolation),
            "jo@x.com",
        );
        assert_eq!(err, ContactRepositoryError::duplicate_email("jo@x.com"));
    }

    #[rstest]
    fn check_violation_is_classified() {
        let err = map_insert_error(database_error(DatabaseErrorKind::CheckViolation), "jo@x.com");
        assert!(
            matches!(err, ContactRepositoryError::CheckViolation { .. }),
            "expected CheckViolation, got {err:?}"
        );
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), true)]
    #[case(DieselError::NotFound, false)]
    #[case(DieselError::RollbackTransaction, false)]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), false)]
    fn other_errors_split_into_connection_and_query(
        #[case] error: DieselError,
        #[case] is_connection: bool,
    ) {
        let err = map_diesel_error(error);
        assert_eq!(
            matches!(err, ContactRepositoryError::Connection { .. }),
            is_connection
        );
        assert_eq!(
            matches!(err, ContactRepositoryError::Query { .. }),
            !is_connection
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(50, 50)]
    #[case(u64::MAX, i64::MAX)]
    fn sql_bounds_saturate(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bound(value), expected);
    }
}
