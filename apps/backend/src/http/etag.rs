//! ETag helpers for HTTP cache validation. Grounded on the teacher's
//! `http/etag.rs`, unchanged — the `"game-{id}-v{version}"` format and the
//! optimistic-concurrency `version` it encodes are identical concepts here.

pub fn game_etag(id: i64, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_id_and_version() {
        assert_eq!(game_etag(123, 5), r#""game-123-v5""#);
        assert_eq!(game_etag(1, 0), r#""game-1-v0""#);
    }
}
