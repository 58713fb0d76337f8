//! Endpoint monitoring helpers.

use std::time::Duration;

/// Join an API base URL and an endpoint path with exactly one `/`.
#[must_use]
pub fn endpoint_url(api_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        api_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Milliseconds rounded to two decimals.
#[must_use]
pub fn duration_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}
