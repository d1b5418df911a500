//! Core library for the weather service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The provider client (WeatherAPI.com) behind the [`WeatherProvider`] trait
//! - Mapping of provider payloads into display-ready [`WeatherResult`]s
//! - The shared [`lookup`] operation used by both the REST and gRPC front ends
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod config;
pub mod error;
pub mod lookup;
pub mod mapper;
pub mod model;
pub mod provider;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::Config;
pub use error::WeatherError;
pub use lookup::lookup;
pub use model::{WeatherQuery, WeatherResult};
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
