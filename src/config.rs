//! Client configuration.
//!
//! A [`ClientConfig`] is validated once, when it is built. A client can never be
//! constructed from a config with an empty host or a negative API version.

use std::env;

use serde::Deserialize;
use url::Url;

use crate::auth::Credentials;
use crate::error::CoinbaseError;

/// Environment variable holding the API base URL.
pub const ENV_HOST: &str = "COINBASE_HOST";
/// Environment variable holding the API version.
pub const ENV_VERSION: &str = "COINBASE_VERSION";
/// Environment variable holding the API key.
pub const ENV_KEY: &str = "COINBASE_KEY";
/// Environment variable holding the base64 API secret.
pub const ENV_SECRET: &str = "COINBASE_SECRET";
/// Environment variable toggling TLS peer verification.
pub const ENV_SSL_VERIFY: &str = "COINBASE_SSL_VERIFY";

/// API version path segment, e.g. `2` or `v2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Parse a version segment.
    ///
    /// Numeric versions must be non-negative; other strings are taken as-is.
    pub fn parse(version: impl AsRef<str>) -> Result<Self, CoinbaseError> {
        let version = version.as_ref().trim();
        if version.is_empty() {
            return Err(CoinbaseError::Configuration(
                "coinbase version not provided".to_string(),
            ));
        }
        if let Ok(number) = version.parse::<i64>() {
            if number < 0 {
                return Err(CoinbaseError::Configuration(format!(
                    "coinbase version must be non-negative, got {number}"
                )));
            }
        }
        if version.contains('/') {
            return Err(CoinbaseError::Configuration(format!(
                "coinbase version must be a single path segment, got {version:?}"
            )));
        }
        Ok(Self(version.to_string()))
    }

    /// The version as it appears in request paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ApiVersion {
    fn from(version: u32) -> Self {
        Self(version.to_string())
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated configuration for a [`CoinbaseRestClient`](crate::rest::CoinbaseRestClient).
///
/// # Example
///
/// ```rust
/// use coinbase_api_client::config::ClientConfig;
///
/// # fn main() -> Result<(), coinbase_api_client::CoinbaseError> {
/// let config = ClientConfig::new("https://api.coinbase.com", "v2")?
///     .with_credentials("api_key", "YXBpX3NlY3JldA==");
/// assert_eq!(config.host(), "https://api.coinbase.com");
/// assert!(ClientConfig::new("", "v2").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    host: String,
    api_version: ApiVersion,
    credentials: Option<Credentials>,
    ssl_verify: bool,
}

impl ClientConfig {
    /// Create a config for public endpoints, validating host and version.
    pub fn new(host: impl AsRef<str>, api_version: impl AsRef<str>) -> Result<Self, CoinbaseError> {
        Ok(Self {
            host: validate_host(host.as_ref())?,
            api_version: ApiVersion::parse(api_version)?,
            credentials: None,
            ssl_verify: true,
        })
    }

    /// Attach the API key and base64 secret used by private endpoints.
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(api_key, api_secret));
        self
    }

    /// Enable or disable TLS peer and host verification.
    pub fn with_ssl_verify(mut self, ssl_verify: bool) -> Self {
        self.ssl_verify = ssl_verify;
        self
    }

    /// Load configuration from `COINBASE_*` environment variables.
    ///
    /// `COINBASE_HOST` and `COINBASE_VERSION` are required. `COINBASE_KEY` and
    /// `COINBASE_SECRET` are optional but must be set together.
    /// `COINBASE_SSL_VERIFY` defaults to `true`.
    pub fn from_env() -> Result<Self, CoinbaseError> {
        let host = env::var(ENV_HOST).map_err(|_| {
            CoinbaseError::Configuration(format!("Environment variable {ENV_HOST} not set"))
        })?;
        let version = env::var(ENV_VERSION).map_err(|_| {
            CoinbaseError::Configuration(format!("Environment variable {ENV_VERSION} not set"))
        })?;
        let ssl_verify = match env::var(ENV_SSL_VERIFY) {
            Ok(value) => value.trim().parse::<bool>().map_err(|_| {
                CoinbaseError::Configuration(format!(
                    "{ENV_SSL_VERIFY} must be true or false, got {value:?}"
                ))
            })?,
            Err(_) => true,
        };

        RawClientConfig {
            host: Some(host),
            version: Some(RawVersion::Text(version)),
            key: env::var(ENV_KEY).ok(),
            secret: env::var(ENV_SECRET).ok(),
            ssl_verify,
        }
        .try_into()
    }

    /// The API base URL, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The API version path segment.
    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// The credentials for private endpoints, if configured.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether TLS peers are verified.
    pub fn ssl_verify(&self) -> bool {
        self.ssl_verify
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("credentials", &self.credentials)
            .field("ssl_verify", &self.ssl_verify)
            .finish()
    }
}

fn validate_host(host: &str) -> Result<String, CoinbaseError> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(CoinbaseError::Configuration(
            "coinbase host not provided".to_string(),
        ));
    }
    let url = Url::parse(host)
        .map_err(|e| CoinbaseError::Configuration(format!("invalid coinbase host {host:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoinbaseError::Configuration(format!(
            "coinbase host must be an http(s) URL, got {host:?}"
        )));
    }
    Ok(host.to_string())
}

/// Version as found in a config document: a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(i64),
    Text(String),
}

/// Unvalidated config document, accepting both plain and `coinbase_`-prefixed keys.
#[derive(Deserialize)]
struct RawClientConfig {
    #[serde(default, alias = "coinbase_host")]
    host: Option<String>,
    #[serde(default, alias = "coinbase_version", alias = "api_version")]
    version: Option<RawVersion>,
    #[serde(default, alias = "coinbase_key", alias = "api_key")]
    key: Option<String>,
    #[serde(default, alias = "coinbase_secret", alias = "api_secret")]
    secret: Option<String>,
    #[serde(default = "default_ssl_verify", alias = "sslverify")]
    ssl_verify: bool,
}

fn default_ssl_verify() -> bool {
    true
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = CoinbaseError;

    fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
        let host = raw.host.unwrap_or_default();
        let version = match raw.version {
            Some(RawVersion::Number(number)) => number.to_string(),
            Some(RawVersion::Text(text)) => text,
            None => String::new(),
        };
        let config = ClientConfig::new(host, version)?.with_ssl_verify(raw.ssl_verify);

        let key = raw.key.filter(|k| !k.is_empty());
        let secret = raw.secret.filter(|s| !s.is_empty());
        match (key, secret) {
            (Some(key), Some(secret)) => Ok(config.with_credentials(key, secret)),
            (None, None) => Ok(config),
            _ => Err(CoinbaseError::Configuration(
                "coinbase key and secret must be provided together".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ClientConfig::new("https://api.coinbase.com/", "2").unwrap();
        assert_eq!(config.host(), "https://api.coinbase.com");
        assert_eq!(config.api_version().as_str(), "2");
        assert!(config.credentials().is_none());
        assert!(config.ssl_verify());
    }

    #[test]
    fn test_empty_host_rejected() {
        let err = ClientConfig::new("  ", "2").unwrap_err();
        assert!(matches!(err, CoinbaseError::Configuration(_)));
    }

    #[test]
    fn test_relative_host_rejected() {
        let err = ClientConfig::new("api.coinbase.com", "2").unwrap_err();
        assert!(matches!(err, CoinbaseError::Configuration(_)));
    }

    #[test]
    fn test_negative_version_rejected() {
        let err = ClientConfig::new("https://api.coinbase.com", "-1").unwrap_err();
        assert!(matches!(err, CoinbaseError::Configuration(_)));
        assert!(ApiVersion::parse("").is_err());
        assert!(ApiVersion::parse("v2/extra").is_err());
    }

    #[test]
    fn test_version_accepts_zero_and_strings() {
        assert_eq!(ApiVersion::parse("0").unwrap().to_string(), "0");
        assert_eq!(ApiVersion::parse("v2").unwrap().to_string(), "v2");
        assert_eq!(ApiVersion::from(3u32).as_str(), "3");
    }

    #[test]
    fn test_deserialize_prefixed_keys() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "coinbase_host": "https://api.coinbase.com",
            "coinbase_version": 2,
            "coinbase_key": "key",
            "coinbase_secret": "c2VjcmV0"
        }))
        .unwrap();

        assert_eq!(config.api_version().as_str(), "2");
        let creds = config.credentials().unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "c2VjcmV0");
    }

    #[test]
    fn test_deserialize_plain_keys_and_ssl_flag() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "host": "https://api.sandbox.coinbase.com",
            "version": "v2",
            "ssl_verify": false
        }))
        .unwrap();

        assert_eq!(config.api_version().as_str(), "v2");
        assert!(!config.ssl_verify());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_deserialize_rejects_missing_or_negative_version() {
        let missing = serde_json::from_value::<ClientConfig>(serde_json::json!({
            "host": "https://api.coinbase.com"
        }));
        assert!(missing.is_err());

        let negative = serde_json::from_value::<ClientConfig>(serde_json::json!({
            "host": "https://api.coinbase.com",
            "version": -1
        }));
        assert!(negative.is_err());
    }

    #[test]
    fn test_deserialize_rejects_partial_credentials() {
        let result = serde_json::from_value::<ClientConfig>(serde_json::json!({
            "host": "https://api.coinbase.com",
            "version": 2,
            "key": "key"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new("https://api.coinbase.com", "2")
            .unwrap()
            .with_credentials("my_key", "c3VwZXJfc2VjcmV0");
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("c3VwZXJfc2VjcmV0"));
    }
}
