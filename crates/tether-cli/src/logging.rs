//! Tracing setup for the CLI

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, and `--verbose`
/// turns on debug output for the Tether crates.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(verbose).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,tether_core=debug,tether_cli=debug"
    } else {
        "info"
    }
}
