// SPDX-License-Identifier: GPL-3.0-only

//! Query cache sitting in front of a [`DexSource`].
//!
//! Every request is identified by a [`QueryKey`]. A key holds at most one
//! in-flight request: concurrent callers await the same shared future. Data
//! younger than `stale_time` is served without touching the network, and
//! entries nobody watches are dropped once unused for `gc_time`.

use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use serde_json::Value;
use tokio::{
    sync::{Mutex, watch},
    time::Instant,
};

use crate::{
    DexError, Result,
    source::{DexSource, Resource},
};

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry: RetryPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(10 * 60),
            retry: RetryPolicy::default(),
        }
    }
}

/// Identifies one cached request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Entity {
        resource: Resource,
        key: String,
    },
    List {
        resource: Resource,
        limit: usize,
        offset: usize,
    },
}

impl QueryKey {
    /// Names are case-insensitive upstream, so `Pikachu` and `pikachu` share an entry
    pub fn entity(resource: Resource, name_or_id: impl AsRef<str>) -> Self {
        QueryKey::Entity {
            resource,
            key: name_or_id.as_ref().trim().to_lowercase(),
        }
    }

    pub fn list(resource: Resource, limit: usize, offset: usize) -> Self {
        QueryKey::List {
            resource,
            limit,
            offset,
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::Entity { resource, key } => write!(f, "{resource}/{key}"),
            QueryKey::List {
                resource,
                limit,
                offset,
            } => write!(f, "{resource}?limit={limit}&offset={offset}"),
        }
    }
}

/// What subscribers of a key observe
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Ready(Arc<Value>),
    Failed(DexError),
}

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<Value>>>>;

struct Entry {
    data: Option<Arc<Value>>,
    fetched_at: Option<Instant>,
    last_used: Instant,
    invalidated: bool,
    in_flight: Option<SharedFetch>,
    state: watch::Sender<QueryState>,
}

impl Entry {
    fn new(now: Instant) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            data: None,
            fetched_at: None,
            last_used: now,
            invalidated: false,
            in_flight: None,
            state,
        }
    }

    fn fresh_data(&self, now: Instant, stale_time: Duration) -> Option<Arc<Value>> {
        if self.invalidated {
            return None;
        }

        match (&self.data, self.fetched_at) {
            (Some(data), Some(fetched_at)) if now.duration_since(fetched_at) < stale_time => {
                Some(Arc::clone(data))
            }
            _ => None,
        }
    }

    fn is_collectable(&self, now: Instant, gc_time: Duration) -> bool {
        self.in_flight.is_none()
            && self.state.receiver_count() == 0
            && now.duration_since(self.last_used) >= gc_time
    }
}

struct Inner {
    source: Arc<dyn DexSource>,
    options: QueryOptions,
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

/// Cheaply cloneable handle to a shared query cache
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("options", &self.inner.options)
            .finish()
    }
}

impl QueryCache {
    pub fn new(source: Arc<dyn DexSource>, options: QueryOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                options,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.inner.options
    }

    /// Returns the data for `key`, fetching it when missing or stale.
    ///
    /// Dropping the returned future does not cancel the request for other
    /// callers waiting on the same key.
    pub async fn fetch(&self, key: &QueryKey) -> Result<Arc<Value>> {
        let fetch = {
            let mut entries = self.inner.entries.lock().await;
            let now = Instant::now();
            Self::sweep(&mut entries, now, self.inner.options.gc_time);

            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(now));
            entry.last_used = now;

            if let Some(data) = entry.fresh_data(now, self.inner.options.stale_time) {
                tracing::debug!(%key, "query cache hit");
                return Ok(data);
            }

            match &entry.in_flight {
                Some(in_flight) => {
                    tracing::debug!(%key, "joining in-flight request");
                    in_flight.clone()
                }
                None => {
                    tracing::debug!(%key, "query cache miss");
                    let fetch = self.start_fetch(key.clone());
                    entry.in_flight = Some(fetch.clone());
                    entry.state.send_replace(QueryState::Loading);
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Registers interest in `key`; the receiver sees every state transition.
    ///
    /// Entries with live receivers are never garbage collected.
    pub async fn subscribe(&self, key: &QueryKey) -> watch::Receiver<QueryState> {
        let mut entries = self.inner.entries.lock().await;
        let now = Instant::now();
        let entry = entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(now));
        entry.last_used = now;
        entry.state.subscribe()
    }

    /// Cached data regardless of staleness, never fetches
    pub async fn peek(&self, key: &QueryKey) -> Option<Arc<Value>> {
        let entries = self.inner.entries.lock().await;
        entries.get(key).and_then(|entry| entry.data.clone())
    }

    pub async fn state(&self, key: &QueryKey) -> QueryState {
        let entries = self.inner.entries.lock().await;
        entries
            .get(key)
            .map(|entry| entry.state.borrow().clone())
            .unwrap_or(QueryState::Idle)
    }

    /// Marks the data of `key` as stale so the next fetch goes to the network
    pub async fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.inner.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    /// Evicts unwatched entries unused for `gc_time`, returns how many were dropped
    pub async fn collect_garbage(&self) -> usize {
        let mut entries = self.inner.entries.lock().await;
        Self::sweep(&mut entries, Instant::now(), self.inner.options.gc_time)
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn sweep(entries: &mut HashMap<QueryKey, Entry>, now: Instant, gc_time: Duration) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_collectable(now, gc_time));
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "query cache garbage collected");
        }
        evicted
    }

    /// Runs the request on its own task so it completes even when every caller goes away
    fn start_fetch(&self, key: QueryKey) -> SharedFetch {
        let inner = Arc::clone(&self.inner);
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let result = inner.fetch_with_retry(&task_key).await;
            inner.complete(&task_key, &result).await;
            result
        });

        async move {
            task.await.unwrap_or_else(|err| {
                tracing::error!(%key, %err, "query task did not finish");
                Err(DexError::Network(format!("request for {key} was aborted: {err}")))
            })
        }
        .boxed()
        .shared()
    }
}

impl Inner {
    async fn request(&self, key: &QueryKey) -> Result<Value> {
        match key {
            QueryKey::Entity { resource, key } => self.source.resource(*resource, key).await,
            QueryKey::List {
                resource,
                limit,
                offset,
            } => {
                self.source
                    .resource_list(*resource, *limit, *offset)
                    .await
            }
        }
    }

    async fn fetch_with_retry(&self, key: &QueryKey) -> Result<Arc<Value>> {
        let policy = self.options.retry;
        let mut attempt = 0;

        loop {
            match self.request(key).await {
                Ok(value) => return Ok(Arc::new(value)),
                Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                    let delay = policy.delay(attempt);
                    tracing::warn!(
                        %key,
                        %err,
                        attempt = attempt + 1,
                        ?delay,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_retryable() => {
                    tracing::error!(%key, %err, "giving up after {} attempts", attempt + 1);
                    return Err(DexError::RetriesExhausted {
                        key: key.to_string(),
                        attempts: attempt + 1,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    tracing::warn!(%key, %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn complete(&self, key: &QueryKey, result: &Result<Arc<Value>>) {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(key) else {
            return;
        };

        entry.in_flight = None;
        match result {
            Ok(data) => {
                entry.data = Some(Arc::clone(data));
                entry.fetched_at = Some(Instant::now());
                entry.invalidated = false;
                entry.state.send_replace(QueryState::Ready(Arc::clone(data)));
            }
            Err(err) => {
                entry.state.send_replace(QueryState::Failed(err.clone()));
            }
        }
    }
}
