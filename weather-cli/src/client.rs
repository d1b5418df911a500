use std::time::{Duration, Instant};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use tonic::{
    Code, Request, Status,
    transport::{Channel, Endpoint},
};
use weather_core::WeatherResult;
use weather_server::{WeatherRequest, WeatherServiceClient};

use crate::interactive::CityLookup;

/// How long `connect` waits for the channel to become ready.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper over the generated `WeatherServiceClient`.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    inner: WeatherServiceClient<Channel>,
    call_timeout: Duration,
}

impl WeatherClient {
    /// Dial `addr` (`host:port` or a full URI) and wait until the channel is
    /// ready, giving up after `ready_timeout`.
    pub async fn connect(addr: &str, ready_timeout: Duration) -> anyhow::Result<Self> {
        let uri = if addr.contains("://") {
            addr.to_string()
        } else {
            format!("http://{addr}")
        };

        let endpoint = Endpoint::from_shared(uri)
            .with_context(|| format!("Invalid server address: {addr}"))?
            .connect_timeout(ready_timeout);

        let channel = tokio::time::timeout(ready_timeout, endpoint.connect())
            .await
            .map_err(|_| anyhow!("Connection timeout - server not responding at {addr}"))?
            .with_context(|| format!("Connection failed - could not reach {addr}"))?;

        Ok(Self {
            inner: WeatherServiceClient::new(channel),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        })
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Issue one `GetWeather` call. `timeout` defaults to the client's call timeout.
    pub async fn try_get_weather(
        &mut self,
        city: &str,
        timeout: Option<Duration>,
    ) -> Result<WeatherResult, Status> {
        let timeout = timeout.unwrap_or(self.call_timeout);
        let mut request = Request::new(WeatherRequest {
            city: city.to_string(),
        });
        request.set_timeout(timeout);

        tracing::info!("Requesting weather for: {city}");
        let started = Instant::now();

        let response = tokio::time::timeout(timeout, self.inner.get_weather(request))
            .await
            .map_err(|_| Status::deadline_exceeded("Request timed out"))??;

        tracing::info!("Response received in {:.2}s", started.elapsed().as_secs_f64());
        Ok(response.into_inner().into())
    }

    /// Like [`Self::try_get_weather`], but reports failures on stderr and returns `None`.
    pub async fn get_weather(
        &mut self,
        city: &str,
        timeout: Option<Duration>,
    ) -> Option<WeatherResult> {
        match self.try_get_weather(city, timeout).await {
            Ok(result) => Some(result),
            Err(status) => {
                eprintln!("{}: {}", describe_code(status.code()), status.message());
                None
            }
        }
    }

    /// The result as the same JSON object the REST endpoint serves.
    pub async fn get_weather_json(
        &mut self,
        city: &str,
        timeout: Option<Duration>,
    ) -> Option<Value> {
        let result = self.get_weather(city, timeout).await?;
        serde_json::to_value(result).ok()
    }
}

#[async_trait]
impl CityLookup for WeatherClient {
    async fn lookup(&mut self, city: &str) -> Option<WeatherResult> {
        self.get_weather(city, None).await
    }
}

/// Human-readable label for a failed call.
pub fn describe_code(code: Code) -> &'static str {
    match code {
        Code::NotFound => "City not found",
        Code::InvalidArgument => "Invalid city name",
        Code::Unavailable => "Weather service unavailable",
        Code::DeadlineExceeded => "Request timeout",
        Code::Internal => "Server error",
        _ => "Unknown error",
    }
}
