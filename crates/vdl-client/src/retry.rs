//! Transport-only retry with exponential backoff.
//!
//! Retries connect failures and timeouts; a response with any HTTP status
//! is returned immediately — the caller interprets status codes.

use std::time::Duration;

/// Retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries; doubles each attempt (200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Call `f` until it yields a response, retrying transport failures with
/// backoff, up to `MAX_RETRIES + 1` attempts total.
pub(crate) async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..MAX_RETRIES {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "endpoint request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    f().await
}
