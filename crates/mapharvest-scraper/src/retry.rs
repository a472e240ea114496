//! Bounded retry for page interactions.

use std::future::Future;
use std::time::Duration;

use crate::error::PageError;
use crate::page::Page;

/// Returns `true` if another attempt could plausibly succeed. A closed
/// session is final.
fn is_retriable(err: &PageError) -> bool {
    !matches!(err, PageError::Closed)
}

/// Runs `operation` up to `attempts` times, pausing `backoff` on the page
/// between failures. Returns the last error once attempts are exhausted.
///
/// `attempts` of zero is treated as one.
pub(crate) async fn retry_on_page<P, T, F, Fut>(
    page: &P,
    what: &str,
    attempts: u32,
    backoff: Duration,
    mut operation: F,
) -> Result<T, PageError>
where
    P: Page + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PageError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= attempts {
                    return Err(err);
                }
                tracing::debug!(
                    what,
                    attempt,
                    attempts,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "page interaction failed; retrying"
                );
            }
        }
        page.pause(backoff).await;
        attempt += 1;
    }
}
