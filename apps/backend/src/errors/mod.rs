//! Error code taxonomy for the backend API. The actual `AppError`/RFC 7807
//! machinery lives in the top-level `error` module; this module only owns
//! the stable code strings.

pub mod error_code;

pub use error_code::ErrorCode;
