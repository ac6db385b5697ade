use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinapi_rest::CoinApiClient;
use coinapi_rest::rest::metadata::{
    AssetIconsRequest, AssetsRequest, ExchangeSymbolsRequest, SymbolMapRequest, SymbolsRequest,
};

fn build_client(server: &MockServer) -> CoinApiClient {
    CoinApiClient::builder()
        .server_url(server.uri())
        .api_key("test-key")
        .build()
}

#[tokio::test]
async fn test_list_assets_with_filter() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {
            "asset_id": "BTC",
            "name": "Bitcoin",
            "type_is_crypto": 1,
            "data_start": "2010-07-17",
            "volume_1day_usd": 1234567.89
        },
        {
            "asset_id": "USD",
            "name": "US Dollar",
            "type_is_crypto": 0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/v1/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = AssetsRequest::new().filter_asset_id("BTC;USD");
    let assets = client.list_assets(&request).await.unwrap().into_content().unwrap();

    assert_eq!(assets.len(), 2);
    assert!(assets[0].type_is_crypto);
    assert!(!assets[1].type_is_crypto);

    let received = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = received[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("filter_asset_id".to_string(), "BTC;USD".to_string()),
            ("include_supply".to_string(), "false".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_asset_icons() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {"asset_id": "BTC", "url": "https://example.com/icons/32/btc.png"}
    ]);

    Mock::given(method("GET"))
        .and(path("/v1/assets/icons/32"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let icons = client.list_asset_icons(&AssetIconsRequest::new(32)).await.unwrap();

    assert_eq!(icons.content().unwrap()[0].asset_id.as_deref(), Some("BTC"));
}

#[tokio::test]
async fn test_list_symbols_omits_unset_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/symbols"))
        .and(query_param("filter_exchange_id", "BITSTAMP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "symbol_id": "BITSTAMP_SPOT_BTC_USD",
                "exchange_id": "BITSTAMP",
                "symbol_type": "SPOT",
                "asset_id_base": "BTC",
                "asset_id_quote": "USD"
            }
        ])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = SymbolsRequest::new().filter_exchange_id("BITSTAMP");
    let symbols = client.list_symbols(&request).await.unwrap().into_content().unwrap();

    assert_eq!(symbols[0].symbol_type.as_deref(), Some("SPOT"));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("filter_exchange_id=BITSTAMP"));
}

#[tokio::test]
async fn test_list_exchange_symbols() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/symbols/BITSTAMP"))
        .and(query_param("filter_asset_id", "BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"symbol_id": "BITSTAMP_SPOT_BTC_USD", "exchange_id": "BITSTAMP"},
            {"symbol_id": "BITSTAMP_SPOT_BTC_EUR", "exchange_id": "BITSTAMP"}
        ])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = ExchangeSymbolsRequest::new("BITSTAMP").filter_asset_id("BTC");
    let symbols = client.list_exchange_symbols(&request).await.unwrap().into_content().unwrap();

    assert_eq!(symbols.len(), 2);
}

#[tokio::test]
async fn test_get_symbol_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/symbols/map/BITSTAMP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "symbol_id": "BITSTAMP_SPOT_BTC_USD",
                "symbol_id_exchange": "btcusd",
                "asset_id_base_exchange": "btc",
                "asset_id_quote_exchange": "usd",
                "asset_id_base": "BTC",
                "asset_id_quote": "USD"
            }
        ])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mapping = client
        .get_symbol_mapping(&SymbolMapRequest::new("BITSTAMP"))
        .await
        .unwrap()
        .into_content()
        .unwrap();

    assert_eq!(mapping[0].symbol_id_exchange.as_deref(), Some("btcusd"));
}
