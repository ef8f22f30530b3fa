//! Shared test double for the GraphQL client

#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tether_core::{GraphQlClient, Observable, QueryRequest, QueryResponse, Result, TetherError};

/// Client that answers every call locally and records what happened
#[derive(Default)]
pub struct MockClient {
    /// Labels of stopped subscriptions, in stop order
    pub stopped: Arc<Mutex<Vec<String>>>,
    /// Number of one-shot queries and mutations
    pub queries: AtomicUsize,
    /// Number of successful watch calls
    pub watches: AtomicUsize,
    /// Error returned by every call while set
    pub failure: Mutex<Option<String>>,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().clone()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().as_ref() {
            Some(message) => Err(TetherError::Client(message.clone())),
            None => Ok(()),
        }
    }
}

fn label(request: &QueryRequest) -> String {
    request
        .document
        .operation_name()
        .unwrap_or(request.document.source())
        .to_string()
}

#[async_trait]
impl GraphQlClient for MockClient {
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.check()?;
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(QueryResponse::from_data(json!({ "operation": label(&request) })))
    }

    async fn watch_query(&self, request: QueryRequest) -> Result<Observable> {
        self.check()?;
        self.watches.fetch_add(1, Ordering::SeqCst);

        let name = label(&request);
        let first = QueryResponse::from_data(json!({ "operation": name.clone() }));
        let stopped = self.stopped.clone();
        Ok(Observable::new(
            stream::iter(vec![Ok(first)]).boxed(),
            move || -> Result<()> {
                stopped.lock().push(name.clone());
                Ok(())
            },
        ))
    }
}

/// Shorthand for a named query request
pub fn named_query(name: &str) -> QueryRequest {
    QueryRequest::parse(&format!("query {} {{ items {{ id }} }}", name)).unwrap()
}
