//! Boundary to the external GraphQL client
//!
//! Tether never talks to a server itself. Applications plug their client in
//! by implementing [`GraphQlClient`]; watch-style operations hand back an
//! [`Observable`], which pairs the stream of results with the
//! [`Subscription`] handle that stops it.

use crate::error::{Result, TetherError};
use crate::models::{QueryRequest, QueryResponse};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Live stream of results produced by a watch-style operation
pub type QueryStream = BoxStream<'static, Result<QueryResponse>>;

/// Capability to stop receiving updates from a watch-style operation
pub trait Subscription: Send {
    /// Stop receiving updates
    fn unsubscribe(&mut self) -> Result<()>;
}

impl<F> Subscription for F
where
    F: FnMut() -> Result<()> + Send,
{
    fn unsubscribe(&mut self) -> Result<()> {
        self()
    }
}

/// Result of a watch-style operation: updates plus the handle stopping them
pub struct Observable {
    stream: QueryStream,
    subscription: Box<dyn Subscription>,
}

impl Observable {
    /// Pair a stream with the subscription that stops it
    pub fn new(stream: QueryStream, subscription: impl Subscription + 'static) -> Self {
        Self {
            stream,
            subscription: Box::new(subscription),
        }
    }

    /// Split into the update stream and the subscription handle
    pub fn into_parts(self) -> (QueryStream, Box<dyn Subscription>) {
        (self.stream, self.subscription)
    }
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

/// GraphQL client operations Tether forwards to
///
/// Implementations own transport, caching and normalization. Errors are
/// reported as [`TetherError::Client`] (or [`TetherError::GraphQl`]) and are
/// handed back to callers untouched.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Run a one-shot query
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse>;

    /// Run a mutation
    async fn mutate(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.query(request).await
    }

    /// Watch a query; the stream yields a result every time it changes
    async fn watch_query(&self, request: QueryRequest) -> Result<Observable>;

    /// Start a GraphQL subscription operation
    async fn subscribe(&self, request: QueryRequest) -> Result<Observable> {
        self.watch_query(request).await
    }
}

/// Producer side of [`observable_channel`]
#[derive(Debug, Clone)]
pub struct ObservableSender {
    tx: mpsc::Sender<Result<QueryResponse>>,
    token: CancellationToken,
}

impl ObservableSender {
    /// Push a result to the consumer
    ///
    /// Fails once the subscription has been stopped or the consumer dropped
    /// its stream, telling the producer to stop.
    pub async fn send(&self, item: Result<QueryResponse>) -> Result<()> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(closed()),
            sent = self.tx.send(item) => sent.map_err(|_| closed()),
        }
    }

    /// Whether the consumer can no longer receive results
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled() || self.tx.is_closed()
    }

    /// Resolve once the consumer can no longer receive results
    pub async fn closed(&self) {
        tokio::select! {
            _ = self.token.cancelled() => {}
            _ = self.tx.closed() => {}
        }
    }
}

fn closed() -> TetherError {
    TetherError::client("subscription closed")
}

/// Channel-backed [`Observable`] for client implementations
///
/// Unsubscribing ends the consumer stream right away, even if results are
/// still buffered, and makes [`ObservableSender::send`] fail.
pub fn observable_channel(capacity: usize) -> (ObservableSender, Observable) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let token = CancellationToken::new();

    let stream = ReceiverStream::new(rx)
        .take_until(token.clone().cancelled_owned())
        .boxed();
    let stop = token.clone();
    let observable = Observable::new(stream, move || -> Result<()> {
        stop.cancel();
        Ok(())
    });

    (ObservableSender { tx, token }, observable)
}
