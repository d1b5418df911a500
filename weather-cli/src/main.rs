//! Binary crate for the `weather` gRPC client.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Talking to `weather-server grpc`
//! - Human-friendly and JSON output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod interactive;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
