use std::time::Instant;

use crate::{WeatherError, WeatherProvider, WeatherQuery, WeatherResult, mapper};

/// Validate `raw_city`, fetch it from `provider` and map the payload.
///
/// Blank input fails with [`WeatherError::InvalidInput`] before the provider is touched.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    raw_city: &str,
) -> Result<WeatherResult, WeatherError> {
    let query = WeatherQuery::parse(raw_city)?;
    let started = Instant::now();

    let raw = provider.current(query.city()).await?;
    let result = mapper::map_current(&raw).inspect_err(|e| {
        tracing::error!(city = query.city(), error = %e, "invalid response format from provider");
    })?;

    tracing::info!(
        city = %result.city,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "weather lookup succeeded"
    );

    Ok(result)
}
