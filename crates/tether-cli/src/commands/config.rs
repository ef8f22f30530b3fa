use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tether_core::Config;

use super::OutputContext;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// List the libraries exposed to the application bundle
    Libraries,
}

impl ConfigCommands {
    /// Whether the command needs the existing configuration file
    pub fn reads_config(&self) -> bool {
        matches!(self, ConfigCommands::Show | ConfigCommands::Libraries)
    }
}

pub fn execute(
    args: ConfigArgs,
    cfg: &Config,
    path: Option<&Path>,
    output: &OutputContext,
) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(cfg, output),
        ConfigCommands::Init { force } => init_config(path, force, output),
        ConfigCommands::Path => {
            println!("{}", config_path(path).display());
            Ok(())
        }
        ConfigCommands::Libraries => show_libraries(cfg, output),
    }
}

fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(Config::default_path)
}

fn show_config(cfg: &Config, output: &OutputContext) -> Result<()> {
    if output.json {
        return output.print_json(cfg);
    }

    println!("Current Configuration");
    println!("=====================");
    println!("Endpoint:   {}", cfg.endpoint);
    println!("Documents:  {}", cfg.documents_dir.display());
    println!("Extensions: {}", cfg.extensions.join(", "));
    if cfg.include.is_empty() {
        println!("Include:    (none)");
    } else {
        println!("Include:    {}", cfg.include.join(", "));
    }

    if let Err(e) = cfg.validate() {
        output.print_error(&e.to_string());
    }
    Ok(())
}

/// Write a default configuration file unless one exists and `force` is off
pub fn init_config(path: Option<&Path>, force: bool, output: &OutputContext) -> Result<()> {
    let target = config_path(path);

    if target.exists() && !force {
        output.print_error(&format!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            target.display()
        ));
        return Ok(());
    }

    Config::default().save(Some(target.as_path()))?;
    output.print_success(&format!("Configuration file created at {}", target.display()));
    Ok(())
}

fn show_libraries(cfg: &Config, output: &OutputContext) -> Result<()> {
    let libraries = cfg.exposed_libraries();
    if output.json {
        return output.print_json(&libraries);
    }
    for name in libraries {
        println!("{}", name);
    }
    Ok(())
}
