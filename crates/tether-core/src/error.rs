//! Error types for Tether

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Tether operations
pub type Result<T> = std::result::Result<T, TetherError>;

/// Errors that can occur when managing GraphQL queries
#[derive(Debug, Error)]
pub enum TetherError {
    /// Error reported by the underlying GraphQL client (network, server, ...)
    #[error("Client error: {0}")]
    Client(String),

    /// The server answered with GraphQL errors and no data
    #[error("GraphQL error: {}", .0.first().map(|e| e.message.as_str()).unwrap_or("unknown error"))]
    GraphQl(Vec<crate::models::GraphQlError>),

    /// A subscription handle failed to stop
    #[error("Unsubscribe failed: {0}")]
    Unsubscribe(String),

    /// The owning object was used before a query manager was injected
    #[error("No query manager injected into {owner}")]
    MissingQueryManager {
        /// Name of the owning object
        owner: String,
    },

    /// A GraphQL document could not be parsed
    #[error("Invalid GraphQL document {}: {message}", .path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<inline>".to_string()))]
    Document {
        /// File the document was loaded from, if any
        path: Option<PathBuf>,
        /// Parser message
        message: String,
    },

    /// A document file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error while loading documents or configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl TetherError {
    /// Build a client error from anything printable
    pub fn client(message: impl std::fmt::Display) -> Self {
        Self::Client(message.to_string())
    }
}

impl From<toml::de::Error> for TetherError {
    fn from(e: toml::de::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<toml::ser::Error> for TetherError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}
