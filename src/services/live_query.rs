// src/services/live_query.rs
//
// Live queries over the Local Store
//
// A live query subscribes to committed-change notifications before its
// first read, emits the initial result and re-reads whenever the table it
// depends on changes. Read failures never end the stream: they degrade to
// the empty value and the next change notification retries.

use std::sync::Arc;

use async_stream::stream;
use futures_util::stream::BoxStream;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

use crate::error::AppResult;
use crate::repositories::{MovieStore, StoreChange};
use crate::services::run_blocking;

/// Follow `query` over `store`, re-running it after every change to `table`.
///
/// Consecutive identical results are emitted once.
pub fn live<T, F>(
    store: Arc<dyn MovieStore>,
    table: StoreChange,
    label: String,
    query: F,
) -> BoxStream<'static, T>
where
    T: Clone + PartialEq + Default + Send + 'static,
    F: Fn(&dyn MovieStore) -> AppResult<T> + Send + Sync + 'static,
{
    let query = Arc::new(query);

    Box::pin(stream! {
        let mut changes = store.changes();
        let mut last: Option<T> = None;

        loop {
            let value = read(&store, &query, &label).await;

            if last.as_ref() != Some(&value) {
                last = Some(value.clone());
                yield value;
            }

            if !wait_for(&mut changes, table, &label).await {
                log::debug!("Live query {} ended: store closed", label);
                break;
            }
        }
    })
}

async fn read<T, F>(store: &Arc<dyn MovieStore>, query: &Arc<F>, label: &str) -> T
where
    T: Default + Send + 'static,
    F: Fn(&dyn MovieStore) -> AppResult<T> + Send + Sync + 'static,
{
    let store = Arc::clone(store);
    let query = Arc::clone(query);

    match run_blocking(move || query(store.as_ref())).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Live query {} degraded to empty: {}", label, e);
            T::default()
        }
    }
}

/// Wait until `table` changes. Returns false once the store is gone.
async fn wait_for(changes: &mut Receiver<StoreChange>, table: StoreChange, label: &str) -> bool {
    loop {
        match changes.recv().await {
            Ok(change) if change == table => return true,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                log::debug!("Live query {} lagged by {} changes, re-reading", label, skipped);
                return true;
            }
            Err(RecvError::Closed) => return false,
        }
    }
}
