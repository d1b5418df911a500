use crate::{Config, WeatherError, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// A source of "current weather" payloads, keyed by city name.
///
/// Implementations return the provider's raw JSON on success; shaping it is
/// the job of [`crate::mapper`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<Value, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// Fails when no API key is configured.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for the weather provider.\n\
             Hint: set WEATHER_API_KEY or run `weather-server configure`."
        )
    })?;

    let provider = WeatherApiProvider::new(api_key, &config.provider_url, config.timeout())?;
    Ok(Arc::new(provider))
}
