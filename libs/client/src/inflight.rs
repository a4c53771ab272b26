//! Deduplication of overlapping asynchronous operations

use futures::future::{BoxFuture, FutureExt, Shared};
use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::ClientResult;

type SharedResult<T> = Shared<BoxFuture<'static, ClientResult<T>>>;

/// In-flight operations keyed by name
///
/// While an operation is running, callers using the same key await the same
/// future instead of starting another one. The entry is dropped once the
/// operation settles, so the next call starts fresh.
pub struct InFlight<T> {
    pending: Arc<Mutex<HashMap<String, SharedResult<T>>>>,
}

impl<T> Clone for InFlight<T> {
    fn clone(&self) -> Self {
        InFlight {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        InFlight {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> InFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the operation running under `key`, or start one with `start`
    pub async fn run<F, Fut>(&self, key: &str, start: F) -> ClientResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let future = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending
                .entry(key.to_string())
                .or_insert_with(|| start().boxed().shared())
                .clone()
        };

        let result = future.clone().await;

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending
            .get(key)
            .is_some_and(|current| current.ptr_eq(&future))
        {
            pending.remove(key);
        }

        result
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}
