use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tether_core::{Config, DocumentRegistry};
use tracing::debug;

use super::OutputContext;

#[derive(Args, Debug)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub command: DocumentsCommands,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommands {
    /// Parse every document and report failures
    Check {
        /// Documents directory (defaults to `documents_dir` from the config)
        dir: Option<PathBuf>,
    },
    /// List documents with their operations
    List {
        /// Documents directory (defaults to `documents_dir` from the config)
        dir: Option<PathBuf>,
    },
}

/// One row of `documents list`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub module: String,
    pub operations: Vec<String>,
    pub fragments: Vec<String>,
}

pub fn execute(args: DocumentsArgs, cfg: &Config, output: &OutputContext) -> Result<()> {
    match args.command {
        DocumentsCommands::Check { dir } => {
            let dir = resolve_dir(dir.as_deref(), cfg);
            let registry = load(&dir, cfg)?;
            if output.json {
                return output.print_json(&serde_json::json!({
                    "directory": dir.display().to_string(),
                    "documents": registry.len(),
                }));
            }
            if output.verbose {
                for (module, document) in registry.iter() {
                    output.print_info(&format!(
                        "{} ({} operation(s))",
                        module,
                        document.operations().len()
                    ));
                }
            }
            output.print_success(&format!(
                "{} document(s) in {} are valid",
                registry.len(),
                dir.display()
            ));
            Ok(())
        }
        DocumentsCommands::List { dir } => {
            let dir = resolve_dir(dir.as_deref(), cfg);
            let registry = load(&dir, cfg)?;
            let rows = summarize(&registry);
            if output.json {
                return output.print_json(&rows);
            }
            if rows.is_empty() {
                output.print_info(&format!("No documents in {}", dir.display()));
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Module", "Operations", "Fragments"]);
            for row in rows {
                table.add_row(vec![
                    row.module,
                    row.operations.join(", "),
                    row.fragments.join(", "),
                ]);
            }
            println!("{table}");
            Ok(())
        }
    }
}

pub fn resolve_dir(dir: Option<&Path>, cfg: &Config) -> PathBuf {
    dir.map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.documents_dir.clone())
}

pub fn load(dir: &Path, cfg: &Config) -> Result<DocumentRegistry> {
    debug!(dir = %dir.display(), extensions = ?cfg.extensions, "Loading documents");
    DocumentRegistry::load_dir_with_extensions(dir, cfg.extensions.as_slice())
        .with_context(|| format!("Failed to load documents from {}", dir.display()))
}

pub fn summarize(registry: &DocumentRegistry) -> Vec<DocumentSummary> {
    registry
        .iter()
        .map(|(module, document)| DocumentSummary {
            module: module.to_string(),
            operations: document
                .operations()
                .iter()
                .map(|op| match &op.name {
                    Some(name) => format!("{} {}", op.kind, name),
                    None => format!("{} (anonymous)", op.kind),
                })
                .collect(),
            fragments: document.fragments().to_vec(),
        })
        .collect()
}
