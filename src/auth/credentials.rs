//! Credential management for Coinbase API authentication.
//!
//! Coinbase issues an API key, sent verbatim in `CB-ACCESS-KEY`, and a
//! base64-encoded secret. Only the decoded secret bytes are used, as the
//! HMAC-SHA512 key; the secret itself never leaves the process.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretBox, SecretString};

use crate::error::CoinbaseError;

/// A Coinbase API key paired with its base64 secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier), sent as `CB-ACCESS-KEY`
    pub api_key: String,
    /// Base64 text as issued by Coinbase; may contain line breaks when pasted
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and a base64-encoded secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret as configured.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Decode the secret into HMAC key bytes.
    ///
    /// ASCII whitespace anywhere in the secret (a trailing newline from a
    /// `.env` file, line-wrapped PEM-style text) is ignored before decoding.
    /// Anything else that is not standard base64 is rejected.
    pub fn decode_secret(&self) -> Result<SecretBox<Vec<u8>>, CoinbaseError> {
        let compact: String = self
            .expose_secret()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        BASE64
            .decode(compact.as_bytes())
            .map(|bytes| SecretBox::new(Box::new(bytes)))
            .map_err(|e| CoinbaseError::Auth(format!("API secret must be valid base64: {e}")))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
