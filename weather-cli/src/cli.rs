use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::Parser;

use crate::client::{DEFAULT_READY_TIMEOUT, WeatherClient};
use crate::interactive::{InquirePrompt, LinePrompt, ctrl_c, run_interactive};
use crate::render::render_weather;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "gRPC Weather Client")]
pub struct Cli {
    /// gRPC server address.
    #[arg(long, default_value = "localhost:50051")]
    pub server: String,

    /// City name to get weather for; omit to start interactive mode.
    #[arg(long)]
    pub city: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Run in interactive mode.
    #[arg(long)]
    pub interactive: bool,

    /// Per-call timeout in seconds.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        eprintln!("Connecting to gRPC Weather Server at {}...", self.server);
        let mut client = WeatherClient::connect(&self.server, DEFAULT_READY_TIMEOUT)
            .await?
            .with_call_timeout(Duration::from_secs(self.timeout));
        eprintln!("Connected successfully!");

        match self.city {
            Some(city) if !self.interactive => {
                if self.json {
                    if let Some(json) = client.get_weather_json(&city, None).await {
                        println!("{}", serde_json::to_string_pretty(&json)?);
                    }
                } else if let Some(result) = client.get_weather(&city, None).await {
                    print!("{}", render_weather(&result));
                }
            }
            _ => {
                let mut stdout = io::stdout();
                if io::stdin().is_terminal() {
                    run_interactive(&mut client, &mut InquirePrompt, &mut stdout, ctrl_c()).await?;
                } else {
                    let reader = io::BufReader::new(io::stdin());
                    let mut prompt = LinePrompt::spawn(reader, io::stdout());
                    run_interactive(&mut client, &mut prompt, &mut stdout, ctrl_c()).await?;
                }
            }
        }

        Ok(())
    }
}
