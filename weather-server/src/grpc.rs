//! gRPC front end: `weather.WeatherService/GetWeather`.

use std::{net::SocketAddr, sync::Arc, time::Instant};

use tonic::{
    Code, Request, Response, Status,
    transport::{Server, server::Router},
};
use tower::layer::util::{Identity, Stack};
use tower::limit::GlobalConcurrencyLimitLayer;
use weather_core::{Config, WeatherError, WeatherProvider, provider_from_config};

use crate::proto::{
    WeatherRequest, WeatherResponse,
    weather_service_server::{WeatherService, WeatherServiceServer},
};

/// Stateless implementation of the generated `WeatherService` trait.
#[derive(Debug, Clone)]
pub struct GrpcWeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl GrpcWeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn into_server(self) -> WeatherServiceServer<Self> {
        WeatherServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl WeatherService for GrpcWeatherService {
    async fn get_weather(
        &self,
        request: Request<WeatherRequest>,
    ) -> Result<Response<WeatherResponse>, Status> {
        let started = Instant::now();
        let city = request.into_inner().city;
        tracing::info!("Received GetWeather request for city: {city}");

        match weather_core::lookup(self.provider.as_ref(), &city).await {
            Ok(result) => {
                tracing::info!(
                    "Successfully processed request for {} in {:.2}s",
                    result.city,
                    started.elapsed().as_secs_f64()
                );
                Ok(Response::new(result.into()))
            }
            Err(err) => {
                let status = status_for(&err);
                tracing::warn!(
                    city = city.trim(),
                    code = ?status.code(),
                    "GetWeather failed: {err}"
                );
                Err(status)
            }
        }
    }
}

/// gRPC status for each lookup failure.
pub fn status_for(err: &WeatherError) -> Status {
    let (code, message) = match err {
        WeatherError::InvalidInput => (Code::InvalidArgument, "City name cannot be empty".into()),
        WeatherError::NotFound(city) => (Code::NotFound, format!("City \"{city}\" not found")),
        WeatherError::Unavailable(_) | WeatherError::Connection(_) => {
            (Code::Unavailable, "Weather service temporarily unavailable".into())
        }
        WeatherError::Timeout => {
            (Code::DeadlineExceeded, "Weather service request timed out".into())
        }
        WeatherError::MalformedResponse(_) => {
            (Code::Internal, "Invalid response from weather service".into())
        }
        WeatherError::Internal(_) => (Code::Internal, "Internal server error".into()),
    };

    Status::new(code, message)
}

/// Serve `WeatherService` on `config.grpc_addr` until Ctrl-C.
///
/// Refuses to start without an API key.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config).inspect_err(|_| {
        tracing::error!("WEATHER_API_KEY not found in environment or config file");
        tracing::error!("Set WEATHER_API_KEY or run `weather-server configure` first");
    })?;

    let addr = parse_listen_addr(&config.grpc_addr)?;

    tracing::info!("Starting gRPC Weather Server on {addr}");
    tracing::info!("API key configured, worker limit {}", config.grpc_workers);

    server(provider, config.grpc_workers)
        .serve_with_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down server...");
        })
        .await?;

    Ok(())
}

/// `WeatherService` behind a global limit of `workers` in-flight calls (at least one).
pub fn server(
    provider: Arc<dyn WeatherProvider>,
    workers: usize,
) -> Router<Stack<GlobalConcurrencyLimitLayer, Identity>> {
    Server::builder()
        .layer(GlobalConcurrencyLimitLayer::new(workers.max(1)))
        .add_service(GrpcWeatherService::new(provider).into_server())
}

fn parse_listen_addr(addr: &str) -> anyhow::Result<SocketAddr> {
    addr.parse().map_err(|e| anyhow::anyhow!("Invalid gRPC listen address {addr:?}: {e}"))
}
