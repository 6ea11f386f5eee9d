//! HTTP middleware stack. `jwt_extract`/`rate_limit` from the teacher have
//! no counterpart (no auth layer, no per-user rate limiting target without
//! one); the rest are carried as ambient request-observability/hardening
//! concerns independent of that decision.

pub mod cors;
pub mod request_trace;
pub mod security_headers;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use request_trace::RequestTrace;
pub use security_headers::SecurityHeaders;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
