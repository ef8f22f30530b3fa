//! Request and response models

use crate::document::{OperationKind, QueryDocument};
use crate::error::{Result, TetherError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Variables passed alongside a GraphQL operation
pub type Variables = serde_json::Map<String, Value>;

/// Request descriptor handed to the GraphQL client
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Parsed document to execute
    pub document: QueryDocument,
    /// Operation variables
    pub variables: Variables,
    /// Operation to run when the document holds more than one
    pub operation_name: Option<String>,
}

/// Wire shape of a request, as sent to GraphQL-over-HTTP endpoints
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    /// Document source text
    pub query: &'a str,
    /// Operation variables
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub variables: &'a Variables,
    /// Selected operation
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
}

impl QueryRequest {
    /// Create a request for a document with no variables
    pub fn new(document: QueryDocument) -> Self {
        Self {
            document,
            variables: Variables::new(),
            operation_name: None,
        }
    }

    /// Parse `source` and wrap it in a request
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self::new(QueryDocument::parse(source)?))
    }

    /// Set a single variable
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replace all variables
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Select the operation to run
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Kind of the operation this request will run
    ///
    /// Fails when the document holds no operation, or when the selected
    /// operation name does not exist in it.
    pub fn operation_kind(&self) -> Result<OperationKind> {
        let operations = self.document.operations();
        let selected = match &self.operation_name {
            Some(name) => operations
                .iter()
                .find(|op| op.name.as_deref() == Some(name.as_str()))
                .ok_or_else(|| {
                    TetherError::Validation(format!("Unknown operation '{}'", name))
                })?,
            None => operations.first().ok_or_else(|| {
                TetherError::Validation("Document contains no operation".to_string())
            })?,
        };
        Ok(selected.kind)
    }

    /// Borrow the request in its wire shape
    pub fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: self.document.source(),
            variables: &self.variables,
            operation_name: self.operation_name.as_deref(),
        }
    }
}

/// Location of an error inside the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

/// A single entry of the `errors` array of a GraphQL response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Error message
    pub message: String,
    /// Path of the field that failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    /// Locations in the document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    /// Server-specific details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    /// Create an error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            locations: Vec::new(),
            extensions: None,
        }
    }
}

/// Result of a GraphQL operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Response data
    #[serde(default)]
    pub data: Option<Value>,
    /// Errors reported by the server
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl QueryResponse {
    /// Successful response carrying `data`
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Whether the server reported any error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Value stored under `key` at the top of `data`
    ///
    /// Returns `Null` when there is no data or no such key, the same way a
    /// lookup on a missing result key yields nothing.
    pub fn result_key(&self, key: &str) -> &Value {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .unwrap_or(&Value::Null)
    }

    /// Convert into the data payload, failing on an error-only response
    ///
    /// Partial responses (data and errors) keep their data.
    pub fn into_result(self) -> Result<Value> {
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ if !self.errors.is_empty() => Err(TetherError::GraphQl(self.errors)),
            _ => Ok(Value::Null),
        }
    }
}
