use rust_decimal::Decimal;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use coinbase_api_client::config::ClientConfig;
use coinbase_api_client::error::CoinbaseError;
use coinbase_api_client::rest::{CoinbaseClient, CoinbaseRestClient, FormParams};

fn build_public_client(server: &MockServer) -> CoinbaseRestClient {
    let config = ClientConfig::new(server.uri(), "v2").unwrap();
    CoinbaseRestClient::new(config).unwrap()
}

fn bodyless_and_unsigned(req: &Request) -> bool {
    req.body.is_empty()
        && !req.headers.contains_key("cb-access-key")
        && !req.headers.contains_key("cb-access-sign")
        && !req.headers.contains_key("cb-access-timestamp")
}

#[tokio::test]
async fn test_get_spot_price() {
    let server = MockServer::start().await;
    let response = serde_json::json!({ "data": { "amount": "50000.00" } });

    Mock::given(method("GET"))
        .and(path("/v2/prices/BTC-USD/spot"))
        .and(bodyless_and_unsigned)
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let price = client.get_spot_price("BTC-USD").await.unwrap();
    assert_eq!(price, response);
}

#[tokio::test]
async fn test_spot_price_typed() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "data": { "amount": "3012.55", "base": "ETH", "currency": "EUR" }
    });

    Mock::given(method("GET"))
        .and(path("/2/prices/ETH-EUR/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri(), "2").unwrap();
    let client = CoinbaseRestClient::new(config).unwrap();
    let price = CoinbaseClient::spot_price(&client, "ETH-EUR").await.unwrap();

    assert_eq!(price.amount, "3012.55".parse::<Decimal>().unwrap());
    assert_eq!(price.base.as_deref(), Some("ETH"));
    assert_eq!(price.currency.as_deref(), Some("EUR"));
}

#[tokio::test]
async fn test_default_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header(
            "user-agent",
            concat!("coinbase-api-client/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(client.get_spot_price("BTC-USD").await.is_ok());
}

#[tokio::test]
async fn test_query_public_post_mode_sends_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/currencies"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("filter=crypto&label=two+words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let params = FormParams::new()
        .with("filter", "crypto")
        .with("label", "two words");
    let result = client.query_public("currencies", &params, true).await.unwrap();
    assert_eq!(result["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_query_public_get_mode_ignores_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/currencies"))
        .and(bodyless_and_unsigned)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let params = FormParams::new().with("ignored", "yes");
    client.query_public("currencies", &params, false).await.unwrap();
}

#[tokio::test]
async fn test_truncated_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{"amount":"500"#))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_spot_price("BTC-USD").await.unwrap_err();
    assert!(matches!(err, CoinbaseError::Decode(_)));
}

#[tokio::test]
async fn test_scalar_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("50000"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/prices/ETH-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#""3000.00""#))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(client.get_spot_price("BTC-USD").await.unwrap_err().is_decode());
    assert!(client.get_spot_price("ETH-USD").await.unwrap_err().is_decode());
}

#[tokio::test]
async fn test_error_status_body_is_returned() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "errors": [{ "id": "not_found", "message": "Invalid currency pair" }]
    });

    Mock::given(method("GET"))
        .and(path("/v2/prices/NOPE-USD/spot"))
        .respond_with(ResponseTemplate::new(404).set_body_json(response.clone()))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let value = client.get_spot_price("NOPE-USD").await.unwrap();
    assert_eq!(value, response);

    let err = client.spot_price("NOPE-USD").await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new(format!("http://127.0.0.1:{port}"), "v2").unwrap();
    let client = CoinbaseRestClient::new(config).unwrap();
    let err = client.get_spot_price("BTC-USD").await.unwrap_err();

    assert!(matches!(err, CoinbaseError::Transport(_)));

    let message = err.to_string();
    assert!(message.starts_with("Transport error: "));

    let mut root: &dyn std::error::Error = &err;
    while let Some(source) = root.source() {
        root = source;
    }
    assert!(
        message.contains(&root.to_string()),
        "{message:?} should carry the root cause {root}"
    );
    #[cfg(target_os = "linux")]
    assert!(message.contains("Connection refused"), "{message:?}");
}
