//! `CB-ACCESS-SIGN` signature generation for Coinbase private endpoints.
//!
//! The signature is computed as:
//! ```text
//! HMAC-SHA512(SHA256(timestamp + "POST" + path + "?" + post_data + body), base64_decode(api_secret))
//! ```
//!
//! `body` is always the empty string. Both digests are raw binary; only the
//! final HMAC output is base64-encoded and sent in the `CB-ACCESS-SIGN` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256, Sha512};

use crate::auth::Credentials;
use crate::error::CoinbaseError;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the API key.
pub const CB_ACCESS_KEY: &str = "CB-ACCESS-KEY";
/// Header carrying the base64 signature.
pub const CB_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
/// Header carrying the signing timestamp.
pub const CB_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";

/// Sign a request for Coinbase's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp` - UNIX seconds sent in `CB-ACCESS-TIMESTAMP`
/// * `url_path` - The canonical path (e.g., "/v2/accounts")
/// * `post_data` - The URL-encoded POST body, nonce included
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use coinbase_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA=="); // base64 of "api_secret"
/// let signature = sign_request(
///     &credentials,
///     1700000000,
///     "/v2/accounts",
///     "nonce=1700000000123456",
/// )?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp: i64,
    url_path: &str,
    post_data: &str,
) -> Result<String, CoinbaseError> {
    let secret_decoded = credentials.decode_secret()?;

    let body = "";
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(timestamp.to_string().as_bytes());
    sha256_hasher.update(b"POST");
    sha256_hasher.update(url_path.as_bytes());
    sha256_hasher.update(b"?");
    sha256_hasher.update(post_data.as_bytes());
    sha256_hasher.update(body.as_bytes());
    let sha256_hash = sha256_hasher.finalize();

    let mut hmac = HmacSha512::new_from_slice(secret_decoded.expose_secret())
        .map_err(|e| CoinbaseError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(&sha256_hash);
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}

/// The authentication headers attached to one private request.
///
/// Recomputed for every call and never stored by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of `CB-ACCESS-KEY`
    pub key: String,
    /// Value of `CB-ACCESS-SIGN`
    pub sign: String,
    /// Value of `CB-ACCESS-TIMESTAMP`
    pub timestamp: String,
}

impl SignedHeaders {
    /// Sign `post_data` for `url_path` and assemble the header values.
    pub fn new(
        credentials: &Credentials,
        timestamp: i64,
        url_path: &str,
        post_data: &str,
    ) -> Result<Self, CoinbaseError> {
        Ok(Self {
            key: credentials.api_key.clone(),
            sign: sign_request(credentials, timestamp, url_path, post_data)?,
            timestamp: timestamp.to_string(),
        })
    }

    /// Header name/value pairs in the order they are sent.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (CB_ACCESS_KEY, self.key.as_str()),
            (CB_ACCESS_SIGN, self.sign.as_str()),
            (CB_ACCESS_TIMESTAMP, self.timestamp.as_str()),
        ]
        .into_iter()
    }
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("key", &self.key)
            .field("sign", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
