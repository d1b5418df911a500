//! Generated protobuf types for `weather.WeatherService`.

use weather_core::WeatherResult;

tonic::include_proto!("weather");

impl From<WeatherResult> for WeatherResponse {
    fn from(r: WeatherResult) -> Self {
        Self {
            city: r.city,
            country: r.country,
            temperature: r.temperature,
            condition: r.condition,
            humidity: r.humidity,
            wind_speed: r.wind_speed,
            last_updated: r.last_updated,
        }
    }
}

impl From<WeatherResponse> for WeatherResult {
    fn from(r: WeatherResponse) -> Self {
        Self {
            city: r.city,
            country: r.country,
            temperature: r.temperature,
            condition: r.condition,
            humidity: r.humidity,
            wind_speed: r.wind_speed,
            last_updated: r.last_updated,
        }
    }
}
