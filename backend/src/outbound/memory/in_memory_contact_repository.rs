//! Process-local `ContactRepository` used when no database is configured.
//!
//! A single mutex guards the table, so every operation is atomic and a
//! listing reads its page and count under the same lock. The rules the
//! PostgreSQL schema enforces (unique email, name/email/phone checks) are
//! enforced here as well so both adapters fail the same way.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{ContactPage, ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, NewContact};

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: Vec<Contact>,
}

/// In-memory implementation of the [`ContactRepository`] port.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use contacts_backend::outbound::memory::InMemoryContactRepository;
///
/// let _repo = InMemoryContactRepository::new(Arc::new(DefaultClock));
/// ```
pub struct InMemoryContactRepository {
    table: Mutex<Table>,
    clock: Arc<dyn Clock>,
}

impl InMemoryContactRepository {
    /// Create an empty repository stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 1,
                rows: Vec::new(),
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, ContactRepositoryError> {
        self.table
            .lock()
            .map_err(|_| ContactRepositoryError::query("contact table lock poisoned"))
    }
}

fn check_row(contact: &NewContact) -> Result<(), ContactRepositoryError> {
    let name_chars = contact.name().trim().chars().count();
    if !(2..=100).contains(&name_chars) {
        return Err(ContactRepositoryError::check_violation("contacts_name_check"));
    }
    let email = contact.email();
    if !email.contains('@') || email != email.to_lowercase() {
        return Err(ContactRepositoryError::check_violation("contacts_email_check"));
    }
    let phone = contact.phone();
    if phone.len() != 10 || !phone.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ContactRepositoryError::check_violation("contacts_phone_check"));
    }
    Ok(())
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_id_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ContactId>, ContactRepositoryError> {
        let table = self.lock()?;
        Ok(table
            .rows
            .iter()
            .find(|row| row.email == email)
            .map(|row| row.id))
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError> {
        check_row(contact)?;
        let mut table = self.lock()?;
        if table.rows.iter().any(|row| row.email == contact.email()) {
            return Err(ContactRepositoryError::duplicate_email(contact.email()));
        }

        let id = ContactId::new(table.next_id)
            .map_err(|err| ContactRepositoryError::query(err.to_string()))?;
        table.next_id = table.next_id.saturating_add(1);
        let now = self.clock.utc();
        let row = Contact {
            id,
            name: contact.name().to_owned(),
            email: contact.email().to_owned(),
            phone: contact.phone().to_owned(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list_page(&self, request: PageRequest) -> Result<ContactPage, ContactRepositoryError> {
        let table = self.lock()?;
        let mut ordered: Vec<&Contact> = table.rows.iter().collect();
        ordered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let contacts = ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        let total = u64::try_from(table.rows.len()).unwrap_or(u64::MAX);
        Ok(ContactPage { contacts, total })
    }

    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError> {
        let mut table = self.lock()?;
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok(table.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactDraft, validate_contact};
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    /// Clock that advances one second on every read.
    struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().expect("clock mutex");
            let now = *next;
            *next = now + Duration::seconds(1);
            now
        }
    }

    /// Clock frozen at one instant.
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("fixture timestamp")
    }

    #[fixture]
    fn repo() -> InMemoryContactRepository {
        InMemoryContactRepository::new(Arc::new(SteppingClock {
            next: Mutex::new(start()),
        }))
    }

    fn contact(n: usize) -> NewContact {
        validate_contact(&ContactDraft::new(
            format!("Person {n}"),
            format!("person{n}@example.com"),
            "5551234567",
        ))
        .expect("valid fixture")
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_timestamps(repo: InMemoryContactRepository) {
        let first = repo.insert(&contact(1)).await.expect("insert");
        let second = repo.insert(&contact(2)).await.expect("insert");

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(first.created_at, first.updated_at);
        assert!(second.created_at > first.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(repo: InMemoryContactRepository) {
        repo.insert(&contact(1)).await.expect("insert");
        let err = repo.insert(&contact(1)).await.expect_err("duplicate");
        assert_eq!(
            err,
            ContactRepositoryError::duplicate_email("person1@example.com")
        );
        assert_eq!(
            repo.find_id_by_email("person1@example.com")
                .await
                .expect("lookup")
                .map(ContactId::get),
            Some(1)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_newest_first_with_total(repo: InMemoryContactRepository) {
        for n in 1..=13 {
            repo.insert(&contact(n)).await.expect("insert");
        }

        let page = repo
            .list_page(PageRequest::clamped(2, 6))
            .await
            .expect("list");

        assert_eq!(page.total, 13);
        let ids: Vec<i64> = page.contacts.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3, 2]);
    }

    #[tokio::test]
    async fn equal_timestamps_fall_back_to_id_order() {
        let repo = InMemoryContactRepository::new(Arc::new(FixedClock(start())));
        for n in 1..=3 {
            repo.insert(&contact(n)).await.expect("insert");
        }

        let page = repo.list_page(PageRequest::default()).await.expect("list");
        let ids: Vec<i64> = page.contacts.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn pages_past_the_end_are_empty(repo: InMemoryContactRepository) {
        repo.insert(&contact(1)).await.expect("insert");
        let page = repo
            .list_page(PageRequest::clamped(i64::MAX, 50))
            .await
            .expect("list");
        assert!(page.contacts.is_empty());
        assert_eq!(page.total, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed(repo: InMemoryContactRepository) {
        let created = repo.insert(&contact(1)).await.expect("insert");

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("second delete"));
        assert_eq!(
            repo.find_id_by_email("person1@example.com")
                .await
                .expect("lookup"),
            None
        );
    }
}
