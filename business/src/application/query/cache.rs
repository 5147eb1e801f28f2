use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::Instant;

use super::key::QueryKey;
use super::retry::{Retryable, with_retry};
use crate::domain::logger::Logger;

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_RETRY: u32 = 1;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Age after which an entry is still served but refreshed in the background.
    pub stale_time: Duration,
    /// Idle time after which an entry may be dropped by `collect_garbage`.
    pub gc_time: Duration,
    pub retry: u32,
    pub retry_delay: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            gc_time: DEFAULT_GC_TIME,
            retry: DEFAULT_RETRY,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    Fresh(V),
    Stale(V),
    Missing,
}

struct Entry<V> {
    data: V,
    updated_at: Instant,
    last_used: Instant,
    invalidated: bool,
}

type InFlight<V, E> = Arc<OnceCell<Result<V, E>>>;

/// Releases a key's in-flight slot when its last waiter finishes or is
/// dropped mid-request.
struct InFlightGuard<'a, V, E> {
    in_flight: &'a Mutex<HashMap<QueryKey, InFlight<V, E>>>,
    key: &'a QueryKey,
    cell: InFlight<V, E>,
}

impl<V, E> Drop for InFlightGuard<'_, V, E> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(current) = in_flight.get(self.key) else {
            return;
        };
        // The map and this guard hold two references; any more are other
        // waiters that still need the slot.
        let last_waiter = Arc::strong_count(&self.cell) <= 2;
        if Arc::ptr_eq(current, &self.cell) && (self.cell.initialized() || last_waiter) {
            in_flight.remove(self.key);
        }
    }
}

struct Inner<V, E> {
    name: &'static str,
    options: CacheOptions,
    entries: Mutex<HashMap<QueryKey, Entry<V>>>,
    in_flight: Mutex<HashMap<QueryKey, InFlight<V, E>>>,
    logger: Arc<dyn Logger>,
}

/// Keyed cache of successful query results with staleness and idle windows.
///
/// Only `Ok` values are stored; a fetcher that maps its own failures to an
/// `Ok` fallback has that fallback cached like any result. Concurrent
/// refreshes of the same key share a single request. Cloning yields another
/// handle to the same cache.
pub struct QueryCache<V, E> {
    inner: Arc<Inner<V, E>>,
}

impl<V, E> Clone for QueryCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> QueryCache<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Retryable + Clone + Display + Send + Sync + 'static,
{
    pub fn new(name: &'static str, options: CacheOptions, logger: Arc<dyn Logger>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                options,
                entries: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                logger,
            }),
        }
    }

    pub fn options(&self) -> CacheOptions {
        self.inner.options
    }

    pub fn lookup(&self, key: &QueryKey) -> Lookup<V> {
        let now = Instant::now();
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            return Lookup::Missing;
        };
        entry.last_used = now;
        if entry.invalidated || now.duration_since(entry.updated_at) >= self.inner.options.stale_time
        {
            Lookup::Stale(entry.data.clone())
        } else {
            Lookup::Fresh(entry.data.clone())
        }
    }

    pub fn get_data(&self, key: &QueryKey) -> Option<V> {
        match self.lookup(key) {
            Lookup::Fresh(data) | Lookup::Stale(data) => Some(data),
            Lookup::Missing => None,
        }
    }

    pub fn set_data(&self, key: QueryKey, data: V) {
        let now = Instant::now();
        self.entries().insert(
            key,
            Entry {
                data,
                updated_at: now,
                last_used: now,
                invalidated: false,
            },
        );
    }

    /// Fresh data is returned as-is; stale data is returned immediately while
    /// a refresh runs in the background; missing data is fetched.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<V, E>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        match self.lookup(&key) {
            Lookup::Fresh(data) => {
                self.log_debug(&format!("hit {}", key));
                Ok(data)
            }
            Lookup::Stale(data) => {
                self.log_debug(&format!("stale {}, refreshing in background", key));
                self.spawn_refresh(key, fetcher);
                Ok(data)
            }
            Lookup::Missing => {
                self.log_debug(&format!("miss {}", key));
                self.refresh(key, fetcher).await
            }
        }
    }

    /// Issues the request regardless of freshness, joining any request
    /// already in flight for the same key.
    pub async fn refresh<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<V, E>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let guard = InFlightGuard {
            in_flight: &self.inner.in_flight,
            key: &key,
            cell: self.in_flight_cell(&key),
        };
        let options = self.inner.options;
        let key = &key;
        guard
            .cell
            .get_or_init(|| async {
                let result = with_retry(options.retry, options.retry_delay, || {
                    let attempt = fetcher();
                    async move {
                        let result = attempt.await;
                        if let Err(err) = &result {
                            self.log_debug(&format!("request for {} failed: {}", key, err));
                        }
                        result
                    }
                })
                .await;
                if let Ok(data) = &result {
                    self.set_data(key.clone(), data.clone());
                }
                result
            })
            .await
            .clone()
    }

    /// Warms the cache without waiting for the result.
    pub fn prefetch<F, Fut>(&self, key: QueryKey, fetcher: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        if !matches!(self.lookup(&key), Lookup::Fresh(_)) {
            self.log_debug(&format!("prefetch {}", key));
            self.spawn_refresh(key, fetcher);
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.in_flight().contains_key(key)
    }

    /// Marks the entry stale so the next read refreshes it.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match self.entries().get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    pub fn invalidate_prefix(&self, prefix: &[&str]) -> usize {
        let mut entries = self.entries();
        let mut count = 0;
        for entry in entries
            .iter_mut()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, entry)| entry)
        {
            entry.invalidated = true;
            count += 1;
        }
        count
    }

    /// Drops entries idle for longer than the gc window. Returns how many
    /// were removed.
    pub fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.inner.options.gc_time;
        let busy: Vec<QueryKey> = self.in_flight().keys().cloned().collect();
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, entry| {
            busy.contains(key) || now.duration_since(entry.last_used) < gc_time
        });
        let removed = before - entries.len();
        if removed > 0 {
            self.log_debug(&format!("collected {} idle entries", removed));
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn spawn_refresh<F, Fut>(&self, key: QueryKey, fetcher: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(err) = cache.refresh(key.clone(), fetcher).await {
                cache
                    .inner
                    .logger
                    .warn(&format!("background refresh of {} failed: {}", key, err));
            }
        });
    }

    fn in_flight_cell(&self, key: &QueryKey) -> InFlight<V, E> {
        Arc::clone(
            self.in_flight()
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry<V>>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn in_flight(&self) -> MutexGuard<'_, HashMap<QueryKey, InFlight<V, E>>> {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn log_debug(&self, message: &str) {
        self.inner
            .logger
            .debug(&format!("[{}] {}", self.inner.name, message));
    }
}
