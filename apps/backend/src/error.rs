//! Web-boundary error type.
//!
//! All errors follow RFC 7807 Problem Details. `AppError` is the only error
//! type that crosses into actix handler return types; everything below it
//! (`domain::errors::DomainError`, `sea_orm::DbErr`) converts into it at the
//! boundary rather than leaking its own shape into HTTP.

use actix_web::error::ResponseError;
use actix_web::http::header::{CONTENT_TYPE, RETRY_AFTER};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::errors::DomainError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Game rule violation: {detail}")]
    Rule { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Rule { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::Rule { detail, .. } => detail.clone(),
            AppError::Db { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail, .. } => detail.clone(),
            AppError::DbUnavailable => "Database unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Rule { code, .. } if matches!(code, ErrorCode::ConcurrentUpdate) => {
                StatusCode::CONFLICT
            }
            AppError::Rule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation { code, detail: detail.into() }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal { detail: detail.into() }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound { code, detail: detail.into() }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config { detail: detail.into() }
    }

    fn to_problem_details(&self, trace_id: String) -> ProblemDetails {
        let status = self.status();
        let code = self.code().as_str();
        ProblemDetails {
            type_: format!("https://bigtwo.app/errors/{}", code.to_lowercase()),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
            trace_id,
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::Config { detail: format!("env var error: {e}") }
    }
}

/// Maps a rule violation surfaced from `domain::game`/`domain::errors` into
/// its HTTP shape. `ConcurrentUpdate` becomes a 409 a client is expected to
/// retry against; everything else is a 422 carrying the specific rule code.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = ErrorCode::from(&err);
        match err {
            DomainError::RoomNotFound => AppError::NotFound { code, detail: err.to_string() },
            DomainError::ConcurrentUpdate => AppError::Conflict { code, detail: err.to_string() },
            DomainError::StoreUnavailable | DomainError::TimeoutExceeded => AppError::DbUnavailable,
            DomainError::StateMissing
            | DomainError::SeatMissing
            | DomainError::HandCorrupt
            | DomainError::ParseCard(_) => AppError::Internal { detail: err.to_string() },
            other => AppError::Rule { code, detail: other.to_string() },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        let error_msg = e.to_string();
        let trace_id = trace_ctx::trace_id();

        match &e {
            sea_orm::DbErr::RecordNotFound(_) => {
                return AppError::NotFound { code: ErrorCode::NotFound, detail: error_msg };
            }
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                warn!(trace_id = %trace_id, raw_error = %error_msg, "database connection failed");
                return AppError::DbUnavailable;
            }
            _ => {}
        }

        if mentions_sqlstate(&error_msg, "23505")
            || error_msg.contains("duplicate key value violates unique constraint")
        {
            return AppError::Conflict {
                code: ErrorCode::ConcurrentUpdate,
                detail: "unique constraint violation".to_string(),
            };
        }

        if error_msg.contains("connection") || error_msg.contains("timeout") || error_msg.contains("pool") {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "database connection issue detected");
            return AppError::DbUnavailable;
        }

        warn!(trace_id = %trace_id, raw_error = %error_msg, "unhandled database error");
        AppError::Db { detail: "database operation failed".to_string() }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();
        let problem_details = self.to_problem_details(trace_id.clone());

        let mut builder = HttpResponse::build(status);
        builder.insert_header((CONTENT_TYPE, "application/problem+json"));
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::SERVICE_UNAVAILABLE {
            builder.insert_header((RETRY_AFTER, "1"));
        }
        builder.json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_update_maps_to_409() {
        let err: AppError = DomainError::ConcurrentUpdate.into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_your_turn_maps_to_422() {
        let err: AppError = DomainError::NotYourTurn.into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), ErrorCode::NotYourTurn);
    }

    #[test]
    fn room_not_found_maps_to_404() {
        let err: AppError = DomainError::RoomNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
