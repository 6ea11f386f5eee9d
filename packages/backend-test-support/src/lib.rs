//! Backend test support utilities: unified logging initialization, RFC 7807
//! response assertions, and unique test-data generation — shared between
//! unit tests (in-crate `#[cfg(test)]`) and the integration suite under
//! `apps/backend/tests/`.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
