use srs_supervisor::cli::Cli;
use srs_supervisor::{Supervisor, logging, run_smoke};

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

/// Ports above `--port` tried when it is already taken
const PORT_SCAN_SPAN: u16 = 100;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = srs_config::Config::load()?;
    if let Some(host) = cli.host {
        config.supervisor.host = host;
    }
    config.supervisor.validate()?;

    logging::setup_logging(config.logging.colored)?;

    let supervisor = match cli.port {
        Some(port) => {
            Supervisor::launch_preferring(&cli.server_bin, port, PORT_SCAN_SPAN, &config.supervisor)
                .await
        }
        None => Supervisor::launch(&cli.server_bin, &config.supervisor).await,
    }
    .inspect_err(|e| error!("Launch failed: {e}. {}", e.recovery_hint()))?;

    // The guard inside `supervisor` kills the child if the smoke run bails out
    let report = run_smoke(&supervisor).await?;
    report.log_summary();

    let status = supervisor.shutdown().await?;
    info!("srs-server exited with {status}");

    Ok(())
}
