use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather REST and gRPC server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON/HTTP API.
    Rest {
        /// Listen address; overrides config and WEATHER_REST_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Serve the gRPC WeatherService.
    Grpc {
        /// Listen address; overrides config and WEATHER_GRPC_ADDR.
        #[arg(long)]
        addr: Option<String>,

        /// Maximum number of concurrent calls.
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Store the WeatherAPI.com key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Rest { addr } => {
                let mut config = Config::load()?;
                if let Some(addr) = addr {
                    config.rest_addr = addr;
                }
                weather_server::rest::serve(&config).await
            }
            Command::Grpc { addr, workers } => {
                let mut config = Config::load()?;
                if let Some(addr) = addr {
                    config.grpc_addr = addr;
                }
                if let Some(workers) = workers {
                    config.grpc_workers = workers;
                }
                weather_server::grpc::serve(&config).await
            }
            Command::Configure => configure(),
        }
    }
}

/// Prompt for the key and save it, leaving environment overrides out of the file.
fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    config.set_api_key(api_key);
    config.save_to(&path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}
