//! Tether command-line interface
//!
//! Runs the document preprocessing step over a directory of `.graphql`
//! files and manages the Tether configuration file.

pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{config, documents};

/// Command-line interface for Tether GraphQL documents
#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, env = "TETHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and list GraphQL documents
    Documents(documents::DocumentsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}
