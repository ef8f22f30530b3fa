//! Configuration
//!
//! Loaded from TOML. Every field has a default, so a missing file or a
//! partial file is valid.

use crate::error::{Result, TetherError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// External libraries exposed to the application bundle by default
pub const DEFAULT_EXPOSED_LIBRARIES: &[&str] = &[
    "apollo-cache",
    "apollo-cache-inmemory",
    "apollo-client",
    "apollo-link",
    "apollo-link-context",
    "apollo-link-http",
    "graphql",
    "graphql-tools",
    "graphql-tag",
];

/// Tether configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint handed to the external client
    pub endpoint: String,
    /// Directory holding `.graphql` documents
    pub documents_dir: PathBuf,
    /// Document file extensions
    pub extensions: Vec<String>,
    /// Libraries exposed in addition to the defaults
    pub include: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            documents_dir: PathBuf::from("app/gql"),
            extensions: vec![crate::document::DEFAULT_EXTENSION.to_string()],
            include: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from [`Config::default_path`]
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write configuration to `path`, or to [`Config::default_path`]
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// `<user config dir>/tether/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tether")
            .join("config.toml")
    }

    /// Check values the defaults cannot guarantee
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| {
            TetherError::Configuration(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(TetherError::Configuration(format!(
                "Endpoint '{}' is not a network URL",
                self.endpoint
            )));
        }

        if self.extensions.is_empty() {
            return Err(TetherError::Configuration(
                "At least one document extension is required".to_string(),
            ));
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(TetherError::Configuration(format!(
                "Invalid document extension '{}' (expected e.g. \"graphql\")",
                ext
            )));
        }

        Ok(())
    }

    /// Default libraries followed by `include`, without duplicates
    pub fn exposed_libraries(&self) -> Vec<String> {
        let mut libraries: Vec<String> = DEFAULT_EXPOSED_LIBRARIES
            .iter()
            .map(|name| name.to_string())
            .collect();
        for name in &self.include {
            if !libraries.contains(name) {
                libraries.push(name.clone());
            }
        }
        libraries
    }
}
