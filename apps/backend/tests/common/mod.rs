#![allow(dead_code)]

// Logging and txn policy setup shared by every integration test binary,
// grounded on the teacher's `tests/common/mod.rs`. Tests run against a real
// `DbProfile::Test` Postgres database with `RollbackOnOk` so every request
// leaves no trace behind.

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

#[ctor::ctor]
fn init_txn_policy() {
    backend::db::txn_policy::set_txn_policy(backend::db::txn_policy::TxnPolicy::RollbackOnOk);
}
