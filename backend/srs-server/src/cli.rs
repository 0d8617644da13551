use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "srs-server")]
#[command(about = "REST service that shuts itself down through GET /exit")]
#[command(version)]
pub struct Cli {
    /// TCP port to listen on (overrides config.toml and SRS_SERVER_PORT)
    pub port: Option<u16>,
}
