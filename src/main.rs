//! CLI entry point for the tile placement rule tool

use clap::Parser;
use tilerules::io::cli::{Cli, RuleProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> tilerules::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let processor = RuleProcessor::new(cli);
    let stdout = std::io::stdout();
    processor.run(&mut stdout.lock())
}
