//! Reshapes the provider's "current weather" JSON into a [`WeatherResult`].

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{WeatherError, WeatherResult};

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

// Numbers stay as `serde_json::Number` so `15.0` renders as "15.0" and `20` as "20".
#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: Number,
    condition: WaCondition,
    humidity: Number,
    wind_kph: Number,
    last_updated: String,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

/// Map a successful provider payload.
///
/// Any missing or mistyped field yields [`WeatherError::MalformedResponse`].
pub fn map_current(raw: &Value) -> Result<WeatherResult, WeatherError> {
    let parsed = WaResponse::deserialize(raw)
        .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

    Ok(WeatherResult {
        city: parsed.location.name,
        country: parsed.location.country,
        temperature: format!("{}°C", parsed.current.temp_c),
        condition: parsed.current.condition.text,
        humidity: format!("{}%", parsed.current.humidity),
        wind_speed: format!("{} km/h", parsed.current.wind_kph),
        last_updated: parsed.current.last_updated,
    })
}
