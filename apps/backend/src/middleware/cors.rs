//! Grounded on the teacher's `middleware/cors.rs`, unchanged apart from
//! dropping `IF_MATCH`/`Authorization` (no optimistic-lock header or auth
//! header this crate's routes read) in favor of the headers our handlers
//! actually use.

use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Builds a restrictive CORS policy: origins come from `CORS_ALLOWED_ORIGINS`
/// (comma-separated), falling back to localhost-only if unset or empty.
pub fn cors_middleware() -> Cors {
    let allowed_raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allowed_origins: Vec<String> = allowed_raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    let effective_origins: Vec<String> = if allowed_origins.is_empty() {
        vec!["http://localhost:3000".to_string(), "http://127.0.0.1:3000".to_string()]
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::IF_NONE_MATCH])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id"), header::ETAG])
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
