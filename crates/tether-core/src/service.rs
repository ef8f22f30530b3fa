//! Shared query service
//!
//! One [`QueryService`] exists per application. It owns the GraphQL client
//! and hands every owning object its own [`QueryManager`].

use crate::client::{GraphQlClient, QueryStream};
use crate::config::Config;
use crate::error::Result;
use crate::manager::QueryManager;
use crate::models::{QueryRequest, QueryResponse};
use std::sync::Arc;
use tracing::debug;

/// Application-wide access point to the GraphQL client
#[derive(Clone)]
pub struct QueryService {
    client: Arc<dyn GraphQlClient>,
    config: Arc<Config>,
}

impl QueryService {
    /// Create a service with the default configuration
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self {
            client,
            config: Arc::new(Config::default()),
        }
    }

    /// Create a service from a validated configuration
    pub fn from_config(client: Arc<dyn GraphQlClient>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Shared client
    pub fn client(&self) -> &Arc<dyn GraphQlClient> {
        &self.client
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create the query manager of a new owning object
    pub fn create_query_manager(&self) -> QueryManager {
        debug!("Creating query manager");
        QueryManager::new(self.client.clone())
    }

    /// Watch a query and register its subscription with `manager`
    pub async fn managed_watch_query(
        &self,
        manager: &QueryManager,
        request: QueryRequest,
    ) -> Result<QueryStream> {
        let observable = self.client.watch_query(request).await?;
        let (stream, subscription) = observable.into_parts();
        manager.track_subscription(subscription);
        Ok(stream)
    }

    /// Unmanaged one-shot query
    pub async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.client.query(request).await
    }

    /// Unmanaged mutation
    pub async fn mutate(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.client.mutate(request).await
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
