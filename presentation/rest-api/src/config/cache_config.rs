use std::time::Duration;

use business::application::query::cache::{
    CacheOptions, DEFAULT_GC_TIME, DEFAULT_RETRY, DEFAULT_RETRY_DELAY, DEFAULT_STALE_TIME,
};

use super::env;

/// Interval between garbage collection sweeps of the query caches
pub const GC_INTERVAL: Duration = Duration::from_secs(60);

/// Load the query cache configuration
///
/// Environment variables:
/// - CACHE_STALE_SECS: Seconds before cached data is refetched (default: 300)
/// - CACHE_GC_SECS: Seconds an unused entry is kept (default: 600)
/// - CACHE_RETRY: Retries of a failed request (default: 1)
pub fn from_env() -> CacheOptions {
    CacheOptions {
        stale_time: Duration::from_secs(env::parse_or(
            "CACHE_STALE_SECS",
            DEFAULT_STALE_TIME.as_secs(),
        )),
        gc_time: Duration::from_secs(env::parse_or("CACHE_GC_SECS", DEFAULT_GC_TIME.as_secs())),
        retry: env::parse_or("CACHE_RETRY", DEFAULT_RETRY),
        retry_delay: DEFAULT_RETRY_DELAY,
    }
}
