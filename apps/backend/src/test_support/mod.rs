//! Test support utilities for backend integration tests. Grounded on the
//! teacher's `test_support/mod.rs`; only the pieces actually exercised by
//! this crate's test suite are carried — `create_test_app` wraps an
//! `AppState` in a test service running the production router, and
//! `schema_guard` fails fast if the test database was never migrated.
//!
//! ```ignore
//! let state = infra::state::build_state().with_db(DbProfile::Test).build().await?;
//! let app = test_support::create_test_app(state).build().await?;
//! ```

pub mod app_builder;
pub mod schema_guard;

pub use app_builder::create_test_app;
