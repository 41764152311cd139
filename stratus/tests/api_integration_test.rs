//! API integration tests: the full router served over HTTP with the
//! provider mocked.

use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use stratus::api::{ApiServer, AppState};
use stratus_sdk::{SdkConfig, SdkRegistry};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEO_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

async fn mount_london(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "London"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "name": "London", "lat": 51.5074, "lon": -0.1278, "country": "GB" }])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"main": "Clouds", "description": "overcast clouds"}],
            "main": {"temp": 20.0, "feels_like": 19.2},
            "visibility": 10000,
            "wind": {"speed": 4.1},
            "sys": {"sunrise": 1699970000, "sunset": 1700002000},
            "timezone": 0,
            "name": "London"
        })))
        .mount(server)
        .await;
}

/// Serve the router on an ephemeral port and return its address.
async fn spawn_api(provider: &MockServer) -> SocketAddr {
    let sdk = SdkConfig::builder()
        .geo_url(format!("{}{}", provider.uri(), GEO_PATH))
        .weather_url(format!("{}{}", provider.uri(), WEATHER_PATH))
        .build();

    let state = Arc::new(AppState {
        registry: SdkRegistry::new(sdk).unwrap(),
        api_key: "test-key".to_string(),
    });
    let app = ApiServer::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn health_reports_ok() {
    let provider = MockServer::start().await;
    let addr = spawn_api(&provider).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn weather_round_trip() {
    let provider = MockServer::start().await;
    mount_london(&provider).await;
    let addr = spawn_api(&provider).await;

    let response = reqwest::get(format!("http://{addr}/weather?city=London"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["temperature"], 20.0);
    assert_eq!(body["condition"], "Clouds");
    assert_eq!(body["location_name"], "London");

    let cities: Vec<String> = reqwest::get(format!("http://{addr}/weather/cities"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cities, vec!["London".to_string()]);
}

#[tokio::test]
async fn missing_city_parameter_is_bad_request() {
    let provider = MockServer::start().await;
    let addr = spawn_api(&provider).await;

    let response = reqwest::get(format!("http://{addr}/weather")).await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&provider)
        .await;
    let addr = spawn_api(&provider).await;

    let response = reqwest::get(format!("http://{addr}/weather?city=Atlantis"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn failing_provider_is_bad_gateway() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&provider)
        .await;
    let addr = spawn_api(&provider).await;

    let response = reqwest::get(format!("http://{addr}/weather?city=London"))
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn refresh_and_teardown() {
    let provider = MockServer::start().await;
    mount_london(&provider).await;
    let addr = spawn_api(&provider).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/weather/refresh?city=London"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("http://{addr}/weather"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let cities: Vec<String> = client
        .get(format!("http://{addr}/weather/cities"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cities.is_empty());
}
