//! Domain error types
//!
//! Application plumbing (config, terminal, logging) uses `anyhow`.
//! Errors that widgets have to render as state live here.

use thiserror::Error;

/// Failure of a weather capability call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("weather fetch failed: {reason}")]
    FetchFailed { reason: String },
}

impl WeatherError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message() {
        let err = WeatherError::fetch_failed("connection refused");
        assert_eq!(err.to_string(), "weather fetch failed: connection refused");
    }
}
