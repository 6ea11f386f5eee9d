//! Task-local trace context for web requests.
//!
//! Provides a minimal API for reading the current request's trace_id from
//! anywhere in the request pipeline, via Tokio task-local storage. Part of
//! the web boundary; core/service code should not depend on it.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Returns the trace_id for the current task, or "unknown" outside a
/// request context.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().as_ref().cloned().unwrap_or_else(|| "unknown".to_string()))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Runs `future` within a trace context. Middleware establishes the scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outside_context_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn within_context_sees_the_set_id() {
        let result = with_trace_id("trace-123".to_string(), async {
            assert_eq!(trace_id(), "trace-123");
            "done"
        })
        .await;
        assert_eq!(result, "done");
        assert_eq!(trace_id(), "unknown");
    }
}
