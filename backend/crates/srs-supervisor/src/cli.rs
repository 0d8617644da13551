use std::path::PathBuf;

use clap::Parser;

/// Launch srs-server, drive the smoke scenario against it, and shut it down
#[derive(Parser, Debug)]
#[command(name = "srs-supervise", version, about)]
pub struct Cli {
    /// Path to the srs-server binary
    #[arg(long, env = "SRS_SERVER_BIN")]
    pub server_bin: PathBuf,

    /// Host to connect to (overrides supervisor.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Preferred port; the next free port above it is used when taken,
    /// and an OS-assigned port when omitted
    #[arg(long)]
    pub port: Option<u16>,
}
