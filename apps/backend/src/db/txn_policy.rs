//! Global commit-vs-rollback policy for transactions opened by `with_txn`.
//! Production always commits on `Ok`; the integration test harness sets
//! `RollbackOnOk` once at startup so every test runs inside a transaction
//! it rolls back at the end, leaving the database untouched between runs.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Sets the process-wide policy. First call wins; later calls are no-ops,
/// matching the teacher's "idempotent first-call" contract.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}

pub fn current() -> TxnPolicy {
    *POLICY.get_or_init(|| TxnPolicy::CommitOnOk)
}
