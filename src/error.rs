//! Error types for the Coinbase client library.

use thiserror::Error;

/// The main error type for all Coinbase client operations.
///
/// Every failure is terminal for the call that raised it: nothing is retried
/// and no partial result accompanies an error.
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// Client configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The underlying HTTP call failed (connection refused, timeout, TLS failure)
    ///
    /// The message includes every cause in the source chain.
    #[error("Transport error: {}", error_chain(.0))]
    Transport(#[from] reqwest_middleware::Error),

    /// The response body is not valid JSON, or not a JSON object/array
    #[error("JSON decode error: {0}")]
    Decode(String),

    /// Request parameters could not be form-encoded
    #[error("Request encoding error: {0}")]
    Encode(String),

    /// Signing failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl From<reqwest::Error> for CoinbaseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

/// Render an error and its sources as `outer: cause: root cause`.
///
/// A source whose text repeats the previous message is skipped.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut last = message.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if text != last && !last.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        last = text;
        source = cause.source();
    }
    message
}

impl CoinbaseError {
    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a response decoding failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the underlying transport failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}
