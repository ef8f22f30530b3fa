//! Loading documents and configuration from disk

use std::fs;
use tempfile::TempDir;
use tether_core::{Config, DocumentRegistry, OperationKind, TetherError};

fn write(dir: &TempDir, relative: &str, content: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_load_dir_keys_by_module_path() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "queries/characters.graphql",
        "query Characters($kind: String) { characters(kind: $kind) { name } }",
    );
    write(&dir, "mutations/add-review.graphql", "mutation AddReview { addReview { id } }");
    write(&dir, "README.md", "not a document");

    let registry = DocumentRegistry::load_dir(dir.path()).unwrap();
    assert_eq!(registry.len(), 2);

    let keys: Vec<&str> = registry.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["mutations/add-review", "queries/characters"]);

    let characters = registry.get("queries/characters").unwrap();
    assert_eq!(characters.operation_name(), Some("Characters"));
    assert_eq!(
        registry.get("mutations/add-review").unwrap().operations()[0].kind,
        OperationKind::Mutation
    );
}

#[test]
fn test_load_dir_reports_broken_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ok.graphql", "{ hero { name } }");
    write(&dir, "broken.graphql", "query { hero {");

    match DocumentRegistry::load_dir(dir.path()) {
        Err(TetherError::Document { path, .. }) => {
            assert!(path.unwrap().ends_with("broken.graphql"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_dir_with_custom_extensions() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.gql", "{ a }");
    write(&dir, "b.graphql", "{ b }");

    let registry = DocumentRegistry::load_dir_with_extensions(dir.path(), &["gql"]).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.get("a").is_some());
}

#[test]
fn test_load_dir_rejects_shared_module_key() {
    let dir = TempDir::new().unwrap();
    write(&dir, "hero.graphql", "query Hero { hero { name } }");
    write(&dir, "hero.gql", "query HeroAgain { hero { id } }");

    match DocumentRegistry::load_dir_with_extensions(dir.path(), &["graphql", "gql"]) {
        Err(TetherError::Validation(message)) => {
            assert!(message.contains("hero.graphql"));
            assert!(message.contains("hero.gql"));
            assert!(message.contains("'hero'"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unreadable_document_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("binary.graphql"), [0xff_u8, 0xfe, 0x00, 0x80]).unwrap();

    match DocumentRegistry::load_dir(dir.path()) {
        Err(err @ TetherError::ReadFile { .. }) => {
            assert!(err.to_string().contains("binary.graphql"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_missing_dir() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        DocumentRegistry::load_dir(dir.path().join("missing")),
        Err(TetherError::Configuration(_))
    ));
}

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        endpoint: "https://api.example.com/graphql".to_string(),
        include: vec!["apollo-link-ws".to_string()],
        ..Default::default()
    };
    config.save(Some(path.as_path())).unwrap();

    let loaded = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_missing_file_is_default() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(loaded, Config::default());
}
