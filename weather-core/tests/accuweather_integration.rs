//! Integration tests for AccuWeatherProvider using wiremock.

use std::time::Duration;

use weather_core::{
    WeatherError, WeatherProvider, provider::accuweather::AccuWeatherProvider, retry::RetryPolicy,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, retry: RetryPolicy) -> AccuWeatherProvider {
    AccuWeatherProvider::builder("TEST_KEY".to_string())
        .base_url(server.uri())
        .timeout(Duration::from_secs(2))
        .retry(retry)
        .build()
        .unwrap()
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        initial_delay_ms: 1,
        max_delay_ms: 5,
    }
}

fn historical_entry(datetime: &str, value: f64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "LocalObservationDateTime": datetime,
        "WeatherText": text,
        "Temperature": { "Metric": { "Value": value, "Unit": "C", "UnitType": 17 } }
    })
}

#[tokio::test]
async fn test_historical_sends_api_key_and_returns_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212/historical/24"))
        .and(query_param("apikey", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            historical_entry("2024-12-12T12:00:00+03:00", 5.0, "Clear sky"),
            historical_entry("2024-12-12T13:00:00+03:00", 7.0, "Partly cloudy"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, RetryPolicy::none());
    let entries = provider.historical_24h("295212").await.unwrap().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["WeatherText"], "Partly cloudy");
}

#[tokio::test]
async fn test_historical_null_body_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212/historical/24"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, RetryPolicy::none());
    assert!(provider.historical_24h("295212").await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_conditions_forwards_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212"))
        .and(query_param("apikey", "TEST_KEY"))
        .and(query_param("city", "Moscow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "Temperature": { "Metric": { "Value": 15, "Unit": "C" } } }
        ])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, RetryPolicy::none());
    let body = provider
        .current_conditions("295212", Some("Moscow"))
        .await
        .unwrap();

    assert_eq!(body[0]["Temperature"]["Metric"]["Value"], 15);
}

#[tokio::test]
async fn test_forecast_requests_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/295212"))
        .and(query_param("details", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "DailyForecasts": [] })),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, RetryPolicy::none());
    let body = provider.daily_forecast("295212").await.unwrap();

    assert!(body["DailyForecasts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212/historical/24"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Api Authorization failed"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, fast_retry());
    let err = provider.historical_24h("295212").await.unwrap_err();

    match err {
        WeatherError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "Api Authorization failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212/historical/24"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212/historical/24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            historical_entry("2024-12-12T12:00:00", 5.0, "Clear"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, fast_retry());
    let entries = provider.historical_24h("295212").await.unwrap().unwrap();

    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_persistent_server_error_reports_last_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/295212"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, fast_retry());
    let err = provider.daily_forecast("295212").await.unwrap_err();

    assert!(matches!(err, WeatherError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentconditions/v1/295212"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, RetryPolicy::none());
    let err = provider.current_conditions("295212", None).await.unwrap_err();

    assert!(matches!(err, WeatherError::Decode { .. }));
}
