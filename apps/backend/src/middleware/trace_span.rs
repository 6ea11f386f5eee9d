//! Per-request tracing span carrying `trace_id`, `method`, `path`, and
//! `game_id` (when the route has one), so every log inside a handler
//! inherits these fields. Grounded on the teacher's `middleware/trace_span.rs`,
//! with the JWT-derived `user_id` field dropped — there is no JWT to read
//! it from (§ Non-goals: no auth layer).
//!
//! Wire after `RequestTrace`, which populates the `String` trace_id this
//! middleware reads out of request extensions.

use std::future::{ready, Ready};
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument, Span};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req.extensions().get::<String>().cloned().unwrap_or_else(|| "missing-trace-id".to_string());
        let method = req.method().clone();
        let path = req.path().to_string();
        let game_id = req.match_info().get("game_id").and_then(|id_str| id_str.parse::<i64>().ok());

        let span: Span = info_span!("request", trace_id = %trace_id, method = %method, path = %path, game_id);

        let fut = self.service.call(req).instrument(span);
        Box::pin(fut)
    }
}
