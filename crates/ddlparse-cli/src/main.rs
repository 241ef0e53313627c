//! ddlparse CLI
//!
//! Command-line tool for parsing and canonicalizing SQLite schemas.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ddlparse_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = run(&cli, std::io::stdin().lock())?;
    println!("{output}");
    Ok(())
}
