use thiserror::Error;

/// Every way a weather lookup can fail.
///
/// Front ends translate these into their own status vocabulary
/// (HTTP status codes, gRPC codes); nothing here knows about either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The city was missing or blank after trimming.
    #[error("City name cannot be empty")]
    InvalidInput,

    /// The provider does not know the location (it answers HTTP 400 for that).
    #[error("City \"{0}\" not found")]
    NotFound(String),

    /// The provider answered with an unexpected HTTP status.
    #[error("weather provider returned status {0}")]
    Unavailable(u16),

    /// The outbound call exceeded its deadline.
    #[error("weather provider request timed out")]
    Timeout,

    /// The outbound call could not be completed (DNS, refused, reset).
    #[error("failed to reach weather provider: {0}")]
    Connection(String),

    /// The provider payload did not have the expected shape.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Internal(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_decode() {
            WeatherError::MalformedResponse(err.to_string())
        } else if err.is_builder() {
            WeatherError::Internal(err.to_string())
        } else {
            WeatherError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_mentions_empty_city() {
        assert!(WeatherError::InvalidInput.to_string().contains("empty"));
    }

    #[test]
    fn not_found_message_quotes_city() {
        let err = WeatherError::NotFound("Atlantis".into());
        assert_eq!(err.to_string(), "City \"Atlantis\" not found");
    }
}
