use std::future::Future;
use std::time::Duration;

use crate::domain::product::errors::ProductError;

/// Errors that may succeed when the same request is issued again.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ProductError {
    fn is_retryable(&self) -> bool {
        self.is_request_failure()
    }
}

/// Runs `operation`, re-running it up to `retries` more times after a fixed
/// `delay` while it fails with a retryable error. Non-retryable errors are
/// returned immediately.
pub async fn with_retry<T, E, F, Fut>(retries: u32, delay: Duration, operation: F) -> Result<T, E>
where
    E: Retryable,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() || attempt >= retries => return Err(err),
            Err(_) => {
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}
