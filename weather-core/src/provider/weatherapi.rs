use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::WeatherError;

use super::WeatherProvider;

/// Client for WeatherAPI.com's `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl WeatherApiProvider {
    /// `timeout` bounds the whole call, connect through body.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, city: &str) -> Result<Value, WeatherError> {
        tracing::info!(city, "calling WeatherAPI.com");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", city), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| {
                let err = WeatherError::from(e);
                tracing::error!(city, error = %err, "WeatherAPI request failed");
                err
            })?;

        let status = res.status();
        match status {
            StatusCode::OK => {}
            // WeatherAPI answers 400 for locations it cannot resolve.
            StatusCode::BAD_REQUEST => return Err(WeatherError::NotFound(city.to_string())),
            other => {
                tracing::warn!(
                    city,
                    status = other.as_u16(),
                    "WeatherAPI returned unexpected status"
                );
                return Err(WeatherError::Unavailable(other.as_u16()));
            }
        }

        res.json::<Value>().await.map_err(WeatherError::from)
    }
}
