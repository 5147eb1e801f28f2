use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use super::cache::{Lookup, QueryCache};
use super::key::QueryKey;
use super::retry::Retryable;

/// What a consumer renders for the query it currently observes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V, E> {
    /// Latest completed data; kept while a newer key is being fetched.
    pub data: Option<V>,
    pub error: Option<E>,
    /// True only while nothing has been loaded yet.
    pub is_loading: bool,
    /// True during any request, including background refreshes.
    pub is_fetching: bool,
}

impl<V, E> Default for QueryState<V, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            is_fetching: false,
        }
    }
}

/// Follows one query key at a time over a shared [`QueryCache`] and
/// publishes its state through a watch channel.
///
/// Results that arrive for a key that is no longer current are dropped.
pub struct QueryObserver<V, E> {
    cache: QueryCache<V, E>,
    current: Arc<Mutex<Option<QueryKey>>>,
    state: Arc<watch::Sender<QueryState<V, E>>>,
}

impl<V, E> Clone for QueryObserver<V, E> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            current: Arc::clone(&self.current),
            state: Arc::clone(&self.state),
        }
    }
}

impl<V, E> QueryObserver<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Retryable + Clone + Display + Send + Sync + 'static,
{
    pub fn new(cache: QueryCache<V, E>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            cache,
            current: Arc::new(Mutex::new(None)),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<V, E>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> QueryState<V, E> {
        self.state.borrow().clone()
    }

    pub fn current_key(&self) -> Option<QueryKey> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switches to `key` and resolves it. `None` disables the query: nothing
    /// is requested and the previous data stays visible.
    pub async fn observe<F, Fut>(&self, key: Option<QueryKey>, fetcher: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        self.set_current(key.clone());

        let Some(key) = key else {
            self.state.send_modify(|state| {
                state.error = None;
                state.is_loading = false;
                state.is_fetching = false;
            });
            return;
        };

        match self.cache.lookup(&key) {
            Lookup::Fresh(data) => {
                self.state.send_replace(QueryState {
                    data: Some(data),
                    ..QueryState::default()
                });
                return;
            }
            Lookup::Stale(data) => {
                self.state.send_replace(QueryState {
                    data: Some(data),
                    is_fetching: true,
                    ..QueryState::default()
                });
            }
            Lookup::Missing => {
                self.state.send_modify(|state| {
                    state.error = None;
                    state.is_loading = state.data.is_none();
                    state.is_fetching = true;
                });
            }
        }

        let result = self.cache.refresh(key.clone(), fetcher).await;

        if self.current_key().as_ref() != Some(&key) {
            return;
        }

        self.state.send_modify(|state| {
            state.is_loading = false;
            state.is_fetching = false;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(err) => state.error = Some(err),
            }
        });
    }

    fn set_current(&self, key: Option<QueryKey>) {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = key;
    }
}
