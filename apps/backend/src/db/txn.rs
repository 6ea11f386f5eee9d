//! Request-scoped shared transaction.
//!
//! A single HTTP request to `routes::games::play_cards` (say) may touch the
//! game row, and a later call within the same request (snapshot re-read for
//! the response body) should see its own uncommitted write. `SharedTxn`
//! lets a transaction begun once per request be reused by every service
//! call in that request instead of each one opening its own. Grounded on
//! the teacher's `db::txn` module; the actix extension-injection mechanism
//! and commit/rollback precedence are carried unchanged.

use std::sync::Arc;

use actix_web::HttpRequest;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::db::txn_policy::{self, TxnPolicy};
use crate::error::AppError;

#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub async fn open(conn: &DatabaseConnection) -> Result<Self, AppError> {
        let txn = conn.begin().await?;
        Ok(Self(Arc::new(txn)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Stores this transaction in the request's extensions so later
    /// `with_txn` calls in the same request pick it up.
    pub fn inject(self, req: &HttpRequest) {
        req.extensions_mut().insert(self);
    }
}

/// Runs `f` against either the request's already-open transaction (if one
/// was injected) or a fresh transaction this call opens and finalizes
/// itself, committing on `Ok` or rolling back on `Err` (reversed under
/// `TxnPolicy::RollbackOnOk`, which the test harness sets so every test
/// request leaves no trace in the database).
pub async fn with_txn<R, F, Fut>(req: Option<&HttpRequest>, conn: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: FnOnce(Arc<DatabaseTransaction>) -> Fut,
    Fut: std::future::Future<Output = Result<R, AppError>>,
{
    if let Some(req) = req {
        if let Some(shared) = req.extensions().get::<SharedTxn>() {
            return f(shared.0.clone()).await;
        }
    }

    let txn = Arc::new(conn.begin().await?);
    let result = f(txn.clone()).await;

    let should_commit = result.is_ok() && txn_policy::current() == TxnPolicy::CommitOnOk;

    let txn = Arc::into_inner(txn).expect("no other references survive past f's return");
    if should_commit {
        txn.commit().await?;
    } else {
        txn.rollback().await?;
    }

    result
}
