//! Coinbase REST API client implementation.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use time::OffsetDateTime;

use crate::auth::{MicrosecondNonce, NonceProvider, SignedHeaders};
use crate::config::ClientConfig;
use crate::error::CoinbaseError;
use crate::rest::params::FormParams;
use crate::rest::transport::{Transport, decode_json};

/// Name of the form parameter carrying the request nonce.
pub const NONCE_PARAM: &str = "nonce";

/// The Coinbase REST API client.
///
/// The client signs private requests with the timestamp captured when it was
/// built. That timestamp is never refreshed, so a long-lived client eventually
/// sends stale `CB-ACCESS-TIMESTAMP` values; rebuild the client to refresh it.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_api_client::config::ClientConfig;
/// use coinbase_api_client::rest::CoinbaseRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new("https://api.coinbase.com", "v2")?;
///     let client = CoinbaseRestClient::new(config)?;
///
///     let price = client.get_spot_price("BTC-USD").await?;
///     println!("Spot price: {}", price["data"]["amount"]);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use coinbase_api_client::config::ClientConfig;
/// use coinbase_api_client::rest::CoinbaseRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new("https://api.coinbase.com", "v2")?
///         .with_credentials("api_key", "YXBpX3NlY3JldA==");
///     let client = CoinbaseRestClient::new(config)?;
///
///     let accounts = client.get_accounts().await?;
///     println!("Accounts: {}", accounts);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseRestClient {
    transport: Transport,
    config: ClientConfig,
    nonce_provider: Arc<dyn NonceProvider>,
    created_at: i64,
}

/// A private request, nonce added and signed, ready to send.
#[derive(Debug, Clone)]
pub struct PrivateRequest {
    /// Canonical path, `/{version}/{method}`
    pub path: String,
    /// Parameters in encoding order, nonce included
    pub params: FormParams,
    /// Form-encoded parameters, sent as the body and signed
    pub post_data: String,
    /// Authentication headers
    pub headers: SignedHeaders,
}

impl CoinbaseRestClient {
    /// Create a client with default settings.
    pub fn new(config: ClientConfig) -> Result<Self, CoinbaseError> {
        Self::builder(config).build()
    }

    /// Create a new client builder.
    pub fn builder(config: ClientConfig) -> CoinbaseRestClientBuilder {
        CoinbaseRestClientBuilder::new(config)
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// UNIX seconds captured at construction and used to sign every private request.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Canonical path of a method: `/{version}/{method}`.
    pub fn canonical_path(&self, method: &str) -> String {
        format!("/{}/{}", self.config.api_version(), method)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host(), path)
    }

    /// Query a public method.
    ///
    /// With `uses_post` unset the call is a bodyless GET and `params` is
    /// ignored. Otherwise the form-encoded `params` are POSTed with no extra
    /// headers.
    pub async fn query_public(
        &self,
        method: &str,
        params: &FormParams,
        uses_post: bool,
    ) -> Result<Value, CoinbaseError> {
        let url = self.url(&self.canonical_path(method));

        let raw = if uses_post {
            let post_data = params.encode()?;
            self.transport
                .execute(Method::POST, &url, &[], Some(post_data))
                .await?
        } else {
            self.transport.execute(Method::GET, &url, &[], None).await?
        };

        decode_json(&raw)
    }

    /// Add a nonce if missing, encode and sign a private request.
    ///
    /// No network I/O happens here.
    pub fn prepare_private(
        &self,
        method: &str,
        mut params: FormParams,
    ) -> Result<PrivateRequest, CoinbaseError> {
        let credentials = self
            .config
            .credentials()
            .ok_or(CoinbaseError::MissingCredentials)?;

        if !params.contains_key(NONCE_PARAM) {
            params.insert(NONCE_PARAM, self.nonce_provider.next_nonce().to_string());
        }

        let post_data = params.encode()?;
        let path = self.canonical_path(method);
        let headers = SignedHeaders::new(credentials, self.created_at, &path, &post_data)?;

        Ok(PrivateRequest {
            path,
            params,
            post_data,
            headers,
        })
    }

    /// Query a private method with a signed POST.
    pub async fn query_private(
        &self,
        method: &str,
        params: FormParams,
    ) -> Result<Value, CoinbaseError> {
        let request = self.prepare_private(method, params)?;
        let url = self.url(&request.path);
        let headers: Vec<(&str, &str)> = request.headers.iter().collect();

        let raw = self
            .transport
            .execute(Method::POST, &url, &headers, Some(request.post_data.clone()))
            .await?;

        decode_json(&raw)
    }
}

impl std::fmt::Debug for CoinbaseRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRestClient")
            .field("host", &self.config.host())
            .field("api_version", &self.config.api_version())
            .field("has_credentials", &self.config.credentials().is_some())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Builder for [`CoinbaseRestClient`].
pub struct CoinbaseRestClientBuilder {
    config: ClientConfig,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timestamp: Option<i64>,
}

impl CoinbaseRestClientBuilder {
    /// Create a new builder for a validated configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            nonce_provider: None,
            user_agent: None,
            timestamp: None,
        }
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a fixed signing timestamp instead of the current time.
    pub fn timestamp(mut self, unix_seconds: i64) -> Self {
        self.timestamp = Some(unix_seconds);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CoinbaseRestClient, CoinbaseError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coinbase-api-client/{}", env!("CARGO_PKG_VERSION")));
        let transport = Transport::new(self.config.ssl_verify(), &user_agent)?;

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(MicrosecondNonce::new()));

        let created_at = self
            .timestamp
            .unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp());

        tracing::debug!(
            host = self.config.host(),
            version = %self.config.api_version(),
            created_at,
            "built coinbase client"
        );

        Ok(CoinbaseRestClient {
            transport,
            config: self.config,
            nonce_provider,
            created_at,
        })
    }
}
