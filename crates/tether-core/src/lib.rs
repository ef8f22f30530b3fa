//! Tether
//!
//! Ties the subscriptions of an external GraphQL client to the lifecycle of
//! the objects that create them. Each owning object gets its own
//! [`QueryManager`]; every watch-style query issued through it is stopped
//! exactly once when the owner is torn down.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tether_core::{GraphQlClient, OwnerKind, QueryOwner, QueryRequest, QueryService};
//!
//! # async fn run(client: Arc<dyn GraphQlClient>) -> tether_core::Result<()> {
//! let service = QueryService::new(client);
//! let mut route = QueryOwner::init(OwnerKind::Route, "characters", &service);
//!
//! let request = QueryRequest::parse("query Characters($kind: String) { characters(kind: $kind) { name } }")?
//!     .variable("kind", "human");
//! let _updates = route.apollo()?.watch_query(request).await?;
//!
//! // From the route's destroy hook:
//! route.teardown();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod manager;
pub mod models;
pub mod owner;
pub mod service;

pub use client::{
    GraphQlClient, Observable, ObservableSender, QueryStream, Subscription, observable_channel,
};
pub use config::{Config, DEFAULT_EXPOSED_LIBRARIES};
pub use document::{DocumentRegistry, Operation, OperationKind, QueryDocument};
pub use error::{Result, TetherError};
pub use manager::QueryManager;
pub use models::*;
pub use owner::{OwnerKind, QueryOwner};
pub use service::QueryService;
