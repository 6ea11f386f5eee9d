//! Grounded on the teacher's `test_support/schema_guard.rs`: fail loudly and
//! early if a test connects to a database that was never migrated, rather
//! than letting every subsequent query fail with an opaque "relation does
//! not exist".

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

pub async fn ensure_schema_ready(db: &DatabaseConnection) {
    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1 FROM information_schema.tables WHERE table_name = 'seaql_migrations'".to_string(),
        ))
        .await;

    match result {
        Ok(Some(_)) => {}
        Ok(None) | Err(_) => {
            panic!(
                "test database schema not prepared; run `migration::migrate` against TEST_DB \
                 (see packages/migration) before running tests"
            );
        }
    }
}
