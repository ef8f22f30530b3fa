//! Per-owner query manager
//!
//! A [`QueryManager`] is created for each owning object (route, component or
//! service). It forwards operations to the shared [`GraphQlClient`] and keeps
//! every subscription handle produced by watch-style calls, in the order they
//! were created, until [`QueryManager::release_all`] stops them.
//!
//! Invariant: a handle handed to the manager is unsubscribed exactly once.
//! `release_all` drains the collection before stopping anything, so calling
//! it again (or dropping the manager afterwards) never reaches a handle twice.

use crate::client::{GraphQlClient, QueryStream, Subscription};
use crate::error::Result;
use crate::models::{QueryRequest, QueryResponse};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Tracks subscriptions created on behalf of one owning object
pub struct QueryManager {
    client: Arc<dyn GraphQlClient>,
    subscriptions: Mutex<Vec<Box<dyn Subscription>>>,
    released: AtomicBool,
}

impl QueryManager {
    /// Create a manager forwarding to `client`
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self {
            client,
            subscriptions: Mutex::new(Vec::new()),
            released: AtomicBool::new(false),
        }
    }

    /// Underlying client
    pub fn client(&self) -> &Arc<dyn GraphQlClient> {
        &self.client
    }

    /// Run a one-shot query
    ///
    /// Nothing is tracked; the client's result is returned as is.
    pub async fn execute_query(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.client.query(request).await
    }

    /// Run a mutation
    pub async fn execute_mutation(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.client.mutate(request).await
    }

    /// Watch a query and track its subscription
    ///
    /// The handle is registered before the stream is returned. A failing
    /// client call registers nothing and its error is returned unchanged.
    pub async fn watch_query(&self, request: QueryRequest) -> Result<QueryStream> {
        let observable = self.client.watch_query(request).await?;
        let (stream, subscription) = observable.into_parts();
        self.track_subscription(subscription);
        Ok(stream)
    }

    /// Start a subscription operation and track it
    pub async fn subscribe(&self, request: QueryRequest) -> Result<QueryStream> {
        let observable = self.client.subscribe(request).await?;
        let (stream, subscription) = observable.into_parts();
        self.track_subscription(subscription);
        Ok(stream)
    }

    /// Register a handle created outside the manager
    pub fn track_subscription(&self, subscription: Box<dyn Subscription>) {
        let mut subscriptions = self.subscriptions.lock();
        subscriptions.push(subscription);
        debug!(tracked = subscriptions.len(), "Tracking subscription");
    }

    /// Number of handles waiting to be released
    pub fn tracked_count(&self) -> usize {
        self.subscriptions.lock().len()
    }

    /// Whether `release_all` has run at least once
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Stop every tracked handle in insertion order and forget them
    ///
    /// A handle that fails to stop is logged and skipped; the others are
    /// still stopped. Returns how many handles were drained.
    pub fn release_all(&self) -> usize {
        // Handles are stopped after the lock is dropped; they may call back
        // into this manager.
        let drained = std::mem::take(&mut *self.subscriptions.lock());
        self.released.store(true, Ordering::Release);

        let count = drained.len();
        for (index, mut subscription) in drained.into_iter().enumerate() {
            if let Err(e) = subscription.unsubscribe() {
                warn!(index, error = %e, "Failed to unsubscribe");
            }
        }

        if count > 0 {
            debug!(released = count, "Released subscriptions");
        }
        count
    }
}

impl Drop for QueryManager {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl std::fmt::Debug for QueryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryManager")
            .field("tracked", &self.tracked_count())
            .field("released", &self.is_released())
            .finish()
    }
}
