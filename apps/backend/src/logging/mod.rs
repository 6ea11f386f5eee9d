//! Tracing-subscriber initialization. Grounded on the teacher's binary-only
//! `telemetry.rs`, moved into the library (rather than kept binary-only)
//! so both `main.rs` and the integration test harness can call the same
//! init function. The teacher's own `logging/` module (`pii.rs`/`security.rs`,
//! redaction of emails and bearer tokens out of log lines) has no
//! counterpart here — there is no PII to redact without an auth layer.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the process-wide `tracing` subscriber. Safe to call more than
/// once in a single process only the first time — `try_init` is used so a
/// second call (e.g. from a test harness alongside the binary) is a no-op
/// rather than a panic.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,backend=info"));

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true).with_ansi(true);

    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
}
