use srs_server::cli::Cli;
use srs_server::{AppState, ExecPolicy, ServiceHost, build_router, logger, runtime};

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    // Load and validate configuration; the positional port wins
    let config = srs_config::Config::load()?.with_port(cli.port);
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.logging.file.as_ref().map(PathBuf::from),
        config.logging.colored,
    )?;

    info!("Starting srs-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let runtime = runtime::build(config.server.worker_threads)?;
    runtime.block_on(serve(config))
}

async fn serve(config: srs_config::Config) -> Result<(), Box<dyn Error>> {
    let state = AppState::new(ExecPolicy::from_config(&config.exec)?);
    let gate = state.gate.clone();

    // Bind failure ends the process here, before anything is served
    let host = ServiceHost::start(&config.bind_addr(), build_router(state), gate).await?;
    info!("Server ready to accept connections");

    host.await_shutdown().await;
    host.stop(config.server.shutdown_grace()).await?;

    info!("Server stopped");
    Ok(())
}
