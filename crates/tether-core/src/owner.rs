//! Owning objects
//!
//! Routes, components and services hold a [`QueryOwner`] and call
//! [`QueryOwner::teardown`] from their destroy hook. The owner carries the
//! injected [`QueryManager`]; using it before injection is a programming
//! error reported on first use.

use crate::error::{Result, TetherError};
use crate::manager::QueryManager;
use crate::service::QueryService;
use std::fmt;
use tracing::debug;

/// Kind of object owning a query manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// Route
    Route,
    /// UI component
    Component,
    /// Long-lived service
    Service,
}

impl OwnerKind {
    /// Lifecycle hook that tears this kind of owner down
    pub fn teardown_hook(self) -> &'static str {
        match self {
            OwnerKind::Route | OwnerKind::Service => "willDestroy",
            OwnerKind::Component => "willDestroyElement",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OwnerKind::Route => "route",
            OwnerKind::Component => "component",
            OwnerKind::Service => "service",
        };
        f.write_str(name)
    }
}

/// Query manager slot of an owning object
#[derive(Debug)]
pub struct QueryOwner {
    kind: OwnerKind,
    name: String,
    manager: Option<QueryManager>,
    destroyed: bool,
}

impl QueryOwner {
    /// Create an owner with no manager injected yet
    pub fn new(kind: OwnerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            manager: None,
            destroyed: false,
        }
    }

    /// Create an owner with its own manager from `service`
    pub fn init(kind: OwnerKind, name: impl Into<String>, service: &QueryService) -> Self {
        let mut owner = Self::new(kind, name);
        owner.inject(service.create_query_manager());
        owner
    }

    /// Inject the manager, returning the one it replaces
    ///
    /// A replaced manager is dropped by the caller, which releases whatever
    /// it still tracks.
    pub fn inject(&mut self, manager: QueryManager) -> Option<QueryManager> {
        self.destroyed = false;
        self.manager.replace(manager)
    }

    /// Owner kind
    pub fn kind(&self) -> OwnerKind {
        self.kind
    }

    /// Owner name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `teardown` has run since the last injection
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Injected query manager
    pub fn apollo(&self) -> Result<&QueryManager> {
        self.manager
            .as_ref()
            .ok_or_else(|| TetherError::MissingQueryManager {
                owner: format!("{} '{}'", self.kind, self.name),
            })
    }

    /// Run the teardown hook: release every tracked subscription
    ///
    /// Safe to call repeatedly and without an injected manager. Returns the
    /// number of subscriptions released by this call.
    pub fn teardown(&mut self) -> usize {
        let released = self.manager.as_ref().map_or(0, QueryManager::release_all);
        if !self.destroyed {
            debug!(
                owner = %self.name,
                kind = %self.kind,
                hook = self.kind.teardown_hook(),
                released,
                "Owner torn down"
            );
        }
        self.destroyed = true;
        released
    }
}
