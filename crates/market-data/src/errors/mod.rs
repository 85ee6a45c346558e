//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// User-facing message for any non-success HTTP response.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Fallback message for transport faults that carry no description.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors that can occur during market data operations.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which determines whether the fetcher should try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    /// Should retry with exponential backoff.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The provider answered with a non-success status, or kept rate limiting
    /// after every retry was spent.
    #[error("Failed to fetch data")]
    FetchFailed {
        /// The provider that failed
        provider: String,
        /// HTTP status of the last response, if one was received
        status: Option<u16>,
    },

    /// A transport-level fault (DNS, connect, TLS, timeout, body read).
    #[error("{0}")]
    Network(String),

    /// The provider returned a body that could not be decoded as a snapshot.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// Decoder error message
        message: String,
    },
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinboard_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "COINGECKO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::Network("connection refused".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } => RetryClass::WithBackoff,
            Self::FetchFailed { .. } | Self::Network(_) | Self::InvalidResponse { .. } => {
                RetryClass::Never
            }
        }
    }

    /// Builds a [`MarketDataError::Network`] from a transport error message,
    /// substituting a generic message when the source has none.
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Network(GENERIC_ERROR_MESSAGE.to_string())
        } else {
            Self::Network(message)
        }
    }
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        MarketDataError::network(err.to_string())
    }
}
