use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinapi_rest::hooks::{AfterErrorHook, BeforeRequestHook, HookContext};
use coinapi_rest::http::{HttpRequest, HttpResponse};
use coinapi_rest::rest::indexes::{CreateIndexRequest, IndexData, UpdateIndexRawRequest};
use coinapi_rest::rest::quotes::CurrentQuoteRequest;
use coinapi_rest::rest::trades::LatestTradesRequest;
use coinapi_rest::{Accept, CoinApiClient, CoinApiError};

fn build_client(server: &MockServer) -> CoinApiClient {
    CoinApiClient::builder()
        .server_url(server.uri())
        .api_key("test-key")
        .build()
}

fn quote_json() -> serde_json::Value {
    serde_json::json!({
        "symbol_id": "BITSTAMP_SPOT_BTC_USD",
        "time_exchange": "2024-01-01T00:00:00Z",
        "time_coinapi": "2024-01-01T00:00:00Z",
        "ask_price": 42001,
        "ask_size": 0.5,
        "bid_price": 42000,
        "bid_size": 1.25
    })
}

struct TagRequest;

impl BeforeRequestHook for TagRequest {
    fn before_request(
        &self,
        _ctx: &HookContext,
        mut request: HttpRequest,
    ) -> Result<HttpRequest, CoinApiError> {
        request.headers.insert("x-request-tag", HeaderValue::from_static("pipeline"));
        Ok(request)
    }
}

struct Block;

impl BeforeRequestHook for Block {
    fn before_request(
        &self,
        ctx: &HookContext,
        _request: HttpRequest,
    ) -> Result<HttpRequest, CoinApiError> {
        Err(CoinApiError::Config(format!("blocked {}", ctx.operation_id)))
    }
}

struct RecoverUnavailable;

impl AfterErrorHook for RecoverUnavailable {
    fn after_error(
        &self,
        _ctx: &HookContext,
        response: Option<HttpResponse>,
        error: Option<CoinApiError>,
    ) -> Result<(Option<HttpResponse>, Option<CoinApiError>), CoinApiError> {
        match response {
            Some(response) if response.status == StatusCode::SERVICE_UNAVAILABLE => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                let body = serde_json::to_vec(&serde_json::json!([]))?;
                Ok((
                    Some(HttpResponse {
                        status: StatusCode::OK,
                        headers,
                        body,
                    }),
                    None,
                ))
            }
            response => Ok((response, error)),
        }
    }
}

#[tokio::test]
async fn test_api_key_and_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/quotes/BITSTAMP_SPOT_BTC_USD/current"))
        .and(header("X-CoinAPI-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .get_current_quote(&CurrentQuoteRequest::new("BITSTAMP_SPOT_BTC_USD"))
        .await
        .unwrap();
    assert!(response.content().unwrap().mid_price().is_some());

    let received = server.received_requests().await.unwrap();
    let accept = received[0].headers.get("accept").unwrap().to_str().unwrap();
    assert_eq!(
        accept,
        "application/json;q=1, text/json;q=0.8, text/plain;q=0.5, application/x-msgpack;q=0"
    );
    let user_agent = received[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("coinapi-rest/rust "));
}

#[tokio::test]
async fn test_api_key_provider_is_asked_per_request() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = CoinApiClient::builder()
        .server_url(server.uri())
        .api_key_provider(move || format!("key-{}", counter.fetch_add(1, Ordering::SeqCst)))
        .build();

    let request = LatestTradesRequest::new();
    client.get_latest_trades(&request).await.unwrap();
    client.get_latest_trades(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let keys: Vec<&str> = received
        .iter()
        .map(|request| request.headers.get("x-coinapi-key").unwrap().to_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["key-0", "key-1"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_error_status_returns_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/quotes/UNKNOWN/current"))
        .respond_with(ResponseTemplate::new(404).set_body_string("symbol not found"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client
        .get_current_quote(&CurrentQuoteRequest::new("UNKNOWN"))
        .await
        .unwrap_err();

    assert!(error.is_api_error());
    assert_eq!(error.status_code(), Some(404));
    match error {
        CoinApiError::Api(api_error) => {
            assert_eq!(api_error.message, "API error occurred");
            assert_eq!(api_error.body, "symbol not found");
            assert_eq!(api_error.to_string(), "API error occurred: Status 404\nsymbol not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_before_request_hook_adds_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .and(header("x-request-tag", "pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = CoinApiClient::builder()
        .server_url(server.uri())
        .api_key("test-key")
        .before_request_hook(TagRequest)
        .build();

    let trades = client.get_latest_trades(&LatestTradesRequest::new()).await.unwrap();
    assert!(trades.content().unwrap().is_empty());
}

#[tokio::test]
async fn test_before_request_hook_can_abort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = CoinApiClient::builder()
        .server_url(server.uri())
        .api_key("test-key")
        .before_request_hook(Block)
        .build();

    let error = client
        .get_latest_trades(&LatestTradesRequest::new())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        CoinApiError::Config(ref message) if message == "blocked get_/v1/trades/latest"
    ));
}

#[tokio::test]
async fn test_after_error_hook_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CoinApiClient::builder()
        .server_url(server.uri())
        .api_key("test-key")
        .after_error_hook(RecoverUnavailable)
        .build();

    let trades = client.get_latest_trades(&LatestTradesRequest::new()).await.unwrap();
    assert_eq!(trades.status_code, StatusCode::OK);
    assert!(trades.content().unwrap().is_empty());
}

#[tokio::test]
async fn test_text_plain_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/quotes/BITSTAMP_SPOT_BTC_USD/current"))
        .and(header("accept", "text/plain"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("BITSTAMP_SPOT_BTC_USD 42000 42001", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .execute(&CurrentQuoteRequest::new("BITSTAMP_SPOT_BTC_USD"), Some(Accept::TextPlain))
        .await
        .unwrap();

    assert_eq!(response.content_plain(), Some("BITSTAMP_SPOT_BTC_USD 42000 42001"));
    assert!(response.content().is_none());
}

#[tokio::test]
async fn test_msgpack_response_is_left_raw() {
    let server = MockServer::start().await;
    let packed = vec![0x91, 0x01];

    Mock::given(method("GET"))
        .and(path("/v1/quotes/BITSTAMP_SPOT_BTC_USD/current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(packed.clone(), "application/x-msgpack"),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .execute(
            &CurrentQuoteRequest::new("BITSTAMP_SPOT_BTC_USD"),
            Some(Accept::ApplicationXMsgpack),
        )
        .await
        .unwrap();

    assert_eq!(response.body(), Some(packed.as_slice()));
}

#[tokio::test]
async fn test_unknown_content_type_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client
        .get_latest_trades(&LatestTradesRequest::new())
        .await
        .unwrap_err();

    match error {
        CoinApiError::Api(api_error) => {
            assert!(api_error.message.starts_with("unknown content-type received"));
            assert_eq!(api_error.status_code, 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_mismatched_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client
        .get_latest_trades(&LatestTradesRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(error, CoinApiError::Deserialize { status: 200, .. }));
}

#[tokio::test]
async fn test_create_index_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/indexes"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "name": "Top Two",
            "index_method": "MARKET_CAP"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "index_id": "IDX_TOP_TWO",
            "status": "CREATED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let index = IndexData {
        name: Some("Top Two".to_string()),
        index_method: Some("MARKET_CAP".to_string()),
        ..Default::default()
    };
    let created = client
        .create_index(&CreateIndexRequest::new(index))
        .await
        .unwrap()
        .into_content()
        .unwrap();

    assert_eq!(created.index_id.as_deref(), Some("IDX_TOP_TWO"));
}

#[tokio::test]
async fn test_update_index_raw_sends_msgpack() {
    let server = MockServer::start().await;
    let packed = vec![0x81, 0xa4, b'n', b'a', b'm', b'e', 0xa1, b'x'];

    Mock::given(method("PUT"))
        .and(path("/v1/indexes/IDX_TOP_TWO"))
        .and(header("content-type", "application/x-msgpack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "index_id": "IDX_TOP_TWO",
            "status": "UPDATED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let updated = client
        .update_index_raw(&UpdateIndexRawRequest::new("IDX_TOP_TWO", packed.clone()))
        .await
        .unwrap();
    assert_eq!(updated.content().unwrap().status.as_deref(), Some("UPDATED"));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, packed);
}

#[tokio::test]
async fn test_rate_limit_headers_are_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/trades/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Limit", "100")
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Request-Cost", "1")
                .set_body_json(serde_json::json!([])),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.get_latest_trades(&LatestTradesRequest::new()).await.unwrap();
    let rate_limit = response.rate_limit();

    assert_eq!(rate_limit.limit, Some(100));
    assert_eq!(rate_limit.request_cost, Some(1));
    assert!(rate_limit.is_exhausted());
}
