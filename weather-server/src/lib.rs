//! Network front ends for the weather service.
//!
//! - [`rest`]: JSON over HTTP (axum)
//! - [`grpc`]: `weather.WeatherService` (tonic)
//!
//! Both delegate to [`weather_core::lookup`]; this crate only translates
//! between wire formats and [`weather_core::WeatherError`].

pub mod grpc;
pub mod proto;
pub mod rest;

pub use grpc::GrpcWeatherService;
pub use proto::weather_service_client::WeatherServiceClient;
pub use proto::weather_service_server::{WeatherService, WeatherServiceServer};
pub use proto::{WeatherRequest, WeatherResponse};
