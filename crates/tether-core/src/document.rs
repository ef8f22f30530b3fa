//! GraphQL documents
//!
//! A [`QueryDocument`] is the parsed form of a `.graphql` source. Documents
//! are validated once, when they are parsed, so a request can never carry
//! text the client would reject as a syntax error.
//!
//! [`DocumentRegistry`] is the preprocessing step applications run over a
//! directory of `.graphql` files: every file becomes an importable document
//! keyed by its module path (`queries/characters` for
//! `<root>/queries/characters.graphql`).

use crate::error::{Result, TetherError};
use graphql_parser::query::{Definition, OperationDefinition, parse_query};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension picked up when none is configured
pub const DEFAULT_EXTENSION: &str = "graphql";

/// Kind of a GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// `query` (including the anonymous `{ ... }` shorthand)
    Query,
    /// `mutation`
    Mutation,
    /// `subscription`
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        };
        f.write_str(name)
    }
}

/// An operation defined in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation kind
    pub kind: OperationKind,
    /// Operation name, `None` for anonymous operations
    pub name: Option<String>,
}

/// Parsed GraphQL document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    source: String,
    operations: Vec<Operation>,
    fragments: Vec<String>,
}

impl QueryDocument {
    /// Parse a document from its source text
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let (operations, fragments) = inspect(&source).map_err(|message| {
            TetherError::Document {
                path: None,
                message,
            }
        })?;

        Ok(Self {
            source,
            operations,
            fragments,
        })
    }

    /// Read and parse a document file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TetherError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(source).map_err(|e| match e {
            TetherError::Document { message, .. } => TetherError::Document {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Original source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Operations in definition order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Names of the fragments defined in the document
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Name of the first named operation
    pub fn operation_name(&self) -> Option<&str> {
        self.operations.iter().find_map(|op| op.name.as_deref())
    }
}

fn inspect(source: &str) -> std::result::Result<(Vec<Operation>, Vec<String>), String> {
    let document = parse_query::<String>(source).map_err(|e| e.to_string())?;

    let mut operations = Vec::new();
    let mut fragments = Vec::new();
    for definition in document.definitions {
        match definition {
            Definition::Operation(op) => operations.push(match op {
                OperationDefinition::SelectionSet(_) => Operation {
                    kind: OperationKind::Query,
                    name: None,
                },
                OperationDefinition::Query(q) => Operation {
                    kind: OperationKind::Query,
                    name: q.name,
                },
                OperationDefinition::Mutation(m) => Operation {
                    kind: OperationKind::Mutation,
                    name: m.name,
                },
                OperationDefinition::Subscription(s) => Operation {
                    kind: OperationKind::Subscription,
                    name: s.name,
                },
            }),
            Definition::Fragment(fragment) => fragments.push(fragment.name),
        }
    }

    Ok((operations, fragments))
}

/// Documents loaded from a directory tree, keyed by module path
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: BTreeMap<String, QueryDocument>,
}

impl DocumentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.graphql` file below `root`
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self> {
        Self::load_dir_with_extensions(root, &[DEFAULT_EXTENSION])
    }

    /// Load every file below `root` whose extension is in `extensions`
    ///
    /// The first file that fails to parse aborts the load, and so do two
    /// files mapping to the same module key (`hero.graphql` and `hero.gql`).
    pub fn load_dir_with_extensions<S: AsRef<str>>(
        root: impl AsRef<Path>,
        extensions: &[S],
    ) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(TetherError::Configuration(format!(
                "Documents directory '{}' does not exist",
                root.display()
            )));
        }

        let mut files = Vec::new();
        collect_files(root, extensions, &mut files)?;
        files.sort();

        let mut registry = Self::new();
        let mut origins: BTreeMap<String, PathBuf> = BTreeMap::new();
        for path in files {
            let key = module_key(root, &path)?;
            if let Some(existing) = origins.get(&key) {
                return Err(TetherError::Validation(format!(
                    "'{}' and '{}' both map to document '{}'",
                    existing.display(),
                    path.display(),
                    key
                )));
            }
            let document = QueryDocument::from_file(&path)?;
            debug!(key = %key, operations = document.operations().len(), "Loaded GraphQL document");
            registry.insert(key.clone(), document);
            origins.insert(key, path);
        }

        info!(
            root = %root.display(),
            documents = registry.len(),
            "Loaded GraphQL documents"
        );
        Ok(registry)
    }

    /// Register a document under `key`, returning the one it replaced
    pub fn insert(&mut self, key: impl Into<String>, document: QueryDocument) -> Option<QueryDocument> {
        self.documents.insert(key.into(), document)
    }

    /// Look up a document by module path
    pub fn get(&self, key: &str) -> Option<&QueryDocument> {
        self.documents.get(key)
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry holds no document
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryDocument)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn collect_files<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, extensions, files)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted.as_ref() == ext))
        {
            files.push(path);
        }
    }
    Ok(())
}

fn module_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        TetherError::Validation(format!(
            "'{}' is outside of '{}'",
            path.display(),
            root.display()
        ))
    })?;

    let relative = relative.with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_operations_and_fragments() {
        let doc = QueryDocument::parse(
            r#"
            query Characters($kind: String) {
                characters(kind: $kind) { ...CharacterFields }
            }
            fragment CharacterFields on Character { id name }
            "#,
        )
        .unwrap();

        assert_eq!(doc.operations().len(), 1);
        assert_eq!(doc.operations()[0].kind, OperationKind::Query);
        assert_eq!(doc.operation_name(), Some("Characters"));
        assert_eq!(doc.fragments(), &["CharacterFields".to_string()]);
    }

    #[test]
    fn test_parse_anonymous_shorthand() {
        let doc = QueryDocument::parse("{ hero { name } }").unwrap();
        assert_eq!(
            doc.operations(),
            &[Operation {
                kind: OperationKind::Query,
                name: None
            }]
        );
        assert_eq!(doc.operation_name(), None);
    }

    #[test]
    fn test_parse_subscription() {
        let doc = QueryDocument::parse("subscription OnReview { reviewAdded { stars } }").unwrap();
        assert_eq!(doc.operations()[0].kind, OperationKind::Subscription);
        assert_eq!(doc.operations()[0].kind.to_string(), "subscription");
    }

    #[test]
    fn test_parse_error() {
        let err = QueryDocument::parse("query { unclosed").unwrap_err();
        assert!(matches!(err, TetherError::Document { path: None, .. }));
    }

    #[test]
    fn test_module_key_uses_forward_slashes() {
        let root = Path::new("/app/gql");
        let key = module_key(root, &root.join("queries").join("characters.graphql")).unwrap();
        assert_eq!(key, "queries/characters");
    }
}
