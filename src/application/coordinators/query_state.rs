// src/application/coordinators/query_state.rs
//
// Latest-value holder shared by every coordinator
//
// CRITICAL RULES:
// - State lives in a watch channel; readers always see the latest value
// - Every reset bumps the generation; a publisher from an older
//   generation can never overwrite a newer state
// - At most one follower task per query; a reset aborts it

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::error_handling::ErrorResponse;

/// What a coordinator currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(ErrorResponse),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResponse> {
        match self {
            QueryState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

struct Shared<T> {
    state: watch::Sender<QueryState<T>>,
    generation: AtomicU64,
}

/// Write access to a query for one generation.
pub struct Publisher<T> {
    shared: Arc<Shared<T>>,
    generation: u64,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            generation: self.generation,
        }
    }
}

impl<T: PartialEq> Publisher<T> {
    pub fn is_current(&self) -> bool {
        self.shared.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Publish `state` unless a newer generation took over.
    /// Returns false once this publisher is stale.
    pub fn publish(&self, state: QueryState<T>) -> bool {
        let mut current = false;

        // The generation check runs under the channel's write lock, the
        // same lock `LiveQuery::reset` bumps the generation under.
        self.shared.state.send_if_modified(|slot| {
            if self.shared.generation.load(Ordering::SeqCst) != self.generation {
                return false;
            }
            current = true;
            if *slot == state {
                return false;
            }
            *slot = state;
            true
        });

        current
    }
}

pub struct LiveQuery<T> {
    shared: Arc<Shared<T>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> LiveQuery<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: QueryState<T>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.shared.state.subscribe()
    }

    pub fn current(&self) -> QueryState<T> {
        self.shared.state.borrow().clone()
    }

    /// Abandon the current follower, go back to `Loading` and hand out
    /// the publisher of the new generation.
    pub fn reset(&self) -> Publisher<T> {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }

        let mut generation = 0;
        self.shared.state.send_modify(|slot| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *slot = QueryState::Loading;
        });

        Publisher {
            shared: Arc::clone(&self.shared),
            generation,
        }
    }

    /// Publish every value of `updates` as `Ready` for as long as
    /// `publisher` stays current.
    pub fn attach(&self, publisher: Publisher<T>, updates: BoxStream<'static, T>) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if !publisher.is_current() {
            return;
        }

        let handle = tokio::spawn(async move {
            let mut updates = updates;
            while let Some(value) = updates.next().await {
                if !publisher.publish(QueryState::Ready(value)) {
                    break;
                }
            }
        });

        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    /// Reset and follow `updates`.
    pub fn follow(&self, updates: BoxStream<'static, T>) {
        let publisher = self.reset();
        self.attach(publisher, updates);
    }

    /// Stop following without touching the current state.
    pub fn stop(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}
