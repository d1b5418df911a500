use serde::{Deserialize, Serialize};

use crate::WeatherError;

/// A validated inbound request: one city name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let city = raw.trim();
        if city.is_empty() {
            return Err(WeatherError::InvalidInput);
        }

        Ok(Self {
            city: city.to_string(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Display-ready weather snapshot for one city.
///
/// Field order is the JSON key order served by the REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    /// e.g. `"15.0°C"`
    pub temperature: String,
    pub condition: String,
    /// e.g. `"72%"`
    pub humidity: String,
    /// e.g. `"11.2 km/h"`
    pub wind_speed: String,
    /// Provider-supplied, passed through untouched.
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        let q = WeatherQuery::parse("  London \n").unwrap();
        assert_eq!(q.city(), "London");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(WeatherQuery::parse("").unwrap_err(), WeatherError::InvalidInput);
        assert_eq!(WeatherQuery::parse(" \t ").unwrap_err(), WeatherError::InvalidInput);
    }

    #[test]
    fn result_serializes_with_rest_keys_in_order() {
        let result = WeatherResult {
            city: "London".into(),
            country: "United Kingdom".into(),
            temperature: "15.0°C".into(),
            condition: "Partly cloudy".into(),
            humidity: "72%".into(),
            wind_speed: "11.2 km/h".into(),
            last_updated: "2024-01-01 12:00".into(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"city":"London","country":"United Kingdom","temperature":"15.0°C","condition":"Partly cloudy","humidity":"72%","wind_speed":"11.2 km/h","last_updated":"2024-01-01 12:00"}"#
        );
    }
}
