//! `DieselContactRepository` against embedded PostgreSQL.
//!
//! Opt-in: run with `RUN_PG_EMBEDDED=1 cargo test -- --ignored`.

use contacts_backend::domain::ports::{ContactRepository, ContactRepositoryError};
use contacts_backend::domain::{ContactDraft, validate_contact};
use contacts_backend::outbound::persistence::{
    DbPool, DieselContactRepository, PoolConfig, run_pending_migrations,
};
use pagination::PageRequest;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

fn draft(n: u32) -> ContactDraft {
    ContactDraft::new(
        format!("Contact {n}"),
        format!("contact{n}@example.com"),
        format!("555000{n:04}"),
    )
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn repository_honours_the_port_contract() {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return;
    }

    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let url = cluster.connection().database_url("postgres");
    let applied = run_pending_migrations(&url).expect("migrations apply");
    assert!(applied >= 1, "contacts migration should apply");

    let runtime = Runtime::new().expect("runtime");
    runtime.block_on(async {
        let pool = DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2))
            .await
            .expect("pool builds");
        let repository = DieselContactRepository::new(pool);

        let mut ids = Vec::new();
        for n in 1..=13 {
            let contact = validate_contact(&draft(n)).expect("valid draft");
            ids.push(repository.insert(&contact).await.expect("inserted").id);
        }

        let first = validate_contact(&draft(1)).expect("valid draft");
        assert_eq!(
            repository.find_id_by_email(first.email()).await.expect("lookup"),
            ids.first().copied()
        );
        let duplicate = repository.insert(&first).await.expect_err("unique email");
        assert!(matches!(
            duplicate,
            ContactRepositoryError::DuplicateEmail { .. }
        ));

        let page = repository
            .list_page(PageRequest::clamped(2, 6))
            .await
            .expect("listed");
        assert_eq!(page.total, 13);
        let listed: Vec<i64> = page.contacts.iter().map(|c| c.id.get()).collect();
        let expected: Vec<i64> = ids.iter().rev().skip(6).take(6).map(|id| id.get()).collect();
        assert_eq!(listed, expected);

        let doomed = *ids.first().expect("seeded");
        assert!(repository.delete(doomed).await.expect("deleted"));
        assert!(!repository.delete(doomed).await.expect("second delete"));
    });
}
