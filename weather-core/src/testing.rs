//! Test doubles shared across the workspace (enable the `test-util` feature).

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{WeatherError, WeatherProvider};

/// A provider that answers every call with the same canned outcome and
/// counts how often it was asked.
#[derive(Debug)]
pub struct StubProvider {
    outcome: Result<Value, WeatherError>,
    calls: AtomicUsize,
    last_city: Mutex<Option<String>>,
}

impl StubProvider {
    pub fn ok(raw: Value) -> Self {
        Self::new(Ok(raw))
    }

    pub fn err(err: WeatherError) -> Self {
        Self::new(Err(err))
    }

    fn new(outcome: Result<Value, WeatherError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_city: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_city(&self) -> Option<String> {
        self.last_city.lock().ok().and_then(|c| c.clone())
    }

    /// The London payload from the provider documentation, renamed to `city`.
    pub fn sample(city: &str) -> Value {
        json!({
            "location": {"name": city, "country": "United Kingdom"},
            "current": {
                "temp_c": 15.0,
                "condition": {"text": "Partly cloudy"},
                "humidity": 72,
                "wind_kph": 11.2,
                "last_updated": "2024-01-01 12:00"
            }
        })
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(&self, city: &str) -> Result<Value, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_city.lock() {
            *last = Some(city.to_string());
        }
        self.outcome.clone()
    }
}
