//! mobfot - query the FotMob football API from the command line
//!
//! Prints the JSON payload of the selected API operation to stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mobfot::cli::{render, Cli, CliError};
use mobfot::FotMob;

/// Installs a stderr subscriber; `RUST_LOG` overrides `--log-level`
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let client = FotMob::new(cli.client_config())?;
    let value = cli.command.run(&client).await?;
    println!("{}", render(&value, cli.compact)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
