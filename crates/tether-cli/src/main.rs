use anyhow::Result;
use clap::Parser;
use tether_cli::commands::{self, OutputContext};
use tether_cli::{Cli, Commands, logging};
use tether_core::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `config init` and `config path` must work even when the file is broken.
    let cfg = match &cli.command {
        Commands::Config(args) if !args.command.reads_config() => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    let output = OutputContext {
        json: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Documents(args) => commands::documents::execute(args, &cfg, &output),
        Commands::Config(args) => {
            commands::config::execute(args, &cfg, cli.config.as_deref(), &output)
        }
    }
}
