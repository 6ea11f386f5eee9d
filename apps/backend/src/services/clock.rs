//! Wall-clock epoch-millisecond helper. The domain layer (`domain::timer`)
//! stays pure and takes `now_ms` as a parameter rather than reading the
//! clock itself; this is the one place that actually calls it.

use time::OffsetDateTime;

pub fn now_ms() -> i64 {
    let now = OffsetDateTime::now_utc();
    now.unix_timestamp() * 1000 + i64::from(now.millisecond())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_a_plausible_unix_millisecond_timestamp() {
        // Anything after 2020-01-01 and before year 2100 in epoch millis.
        let ms = now_ms();
        assert!(ms > 1_577_836_800_000);
        assert!(ms < 4_102_444_800_000);
    }
}
