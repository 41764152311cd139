//! Refresh poller behavior against a mocked provider: cadence, per-city
//! failure isolation, and shutdown.

use serde_json::json;
use std::time::Duration;
use stratus_sdk::{Mode, SdkConfig, SdkRegistry};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEO_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

fn geo_body(name: &str, lat: f64, lon: f64) -> serde_json::Value {
    json!([{ "name": name, "lat": lat, "lon": lon, "country": "XX" }])
}

fn weather_body(name: &str, temp: f64) -> serde_json::Value {
    json!({
        "weather": [{"main": "Clear", "description": "clear sky"}],
        "main": {"temp": temp, "feels_like": temp},
        "wind": {"speed": 2.0},
        "timezone": 0,
        "name": name
    })
}

fn polling_config(server: &MockServer, period: Duration) -> SdkConfig {
    SdkConfig::builder()
        .mode(Mode::Polling)
        .geo_url(format!("{}{}", server.uri(), GEO_PATH))
        .weather_url(format!("{}{}", server.uri(), WEATHER_PATH))
        .refresh_interval(period)
        .stop_grace(Duration::from_secs(2))
        .build()
}

async fn mount_city(server: &MockServer, city: &str, lat: f64) {
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(geo_body(city, lat, 0.0)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn every_seeded_city_is_refreshed_within_a_period() {
    let server = MockServer::start().await;

    for (city, lat) in [("London", 51.5), ("Paris", 48.9), ("Berlin", 52.5)] {
        mount_city(&server, city, lat).await;
    }
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("city", 18.0)))
        .mount(&server)
        .await;

    let registry = SdkRegistry::new(polling_config(&server, Duration::from_millis(200))).unwrap();
    let service = registry.resolve("test-key").await.unwrap();

    // Seed the cache through the on-demand path (one geocode call each).
    for city in ["London", "Paris", "Berlin"] {
        service.get_weather(city).await.unwrap();
    }

    // Wait for at least one full firing over the seeded key set.
    tokio::time::sleep(Duration::from_millis(500)).await;
    registry.destroy("test-key").await;

    let requests = server.received_requests().await.unwrap();
    for city in ["London", "Paris", "Berlin"] {
        let geocodes = requests
            .iter()
            .filter(|r| {
                r.url.path() == GEO_PATH
                    && r.url.query_pairs().any(|(k, v)| k == "q" && v == city)
            })
            .count();
        // One seed call plus at least one poller refresh.
        assert!(
            geocodes >= 2,
            "expected {city} to be refreshed, saw {geocodes} geocode calls"
        );
    }
}

#[tokio::test]
async fn one_failing_city_does_not_block_the_others() {
    let server = MockServer::start().await;

    mount_city(&server, "Paris", 48.9).await;
    // Berlin geocodes once to get seeded, then the endpoint starts failing.
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geo_body("Berlin", 52.5, 0.0)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("city", 18.0)))
        .mount(&server)
        .await;

    let registry = SdkRegistry::new(polling_config(&server, Duration::from_millis(200))).unwrap();
    let service = registry.resolve("test-key").await.unwrap();

    service.get_weather("Paris").await.unwrap();
    service.get_weather("Berlin").await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;

    // Berlin's refresh failures left its previous observation alone, and
    // Paris kept refreshing.
    let cached = service.cached_cities().await;
    assert!(cached.contains(&"Berlin".to_string()));
    assert!(cached.contains(&"Paris".to_string()));

    registry.destroy("test-key").await;

    let requests = server.received_requests().await.unwrap();
    let paris_refreshes = requests
        .iter()
        .filter(|r| {
            r.url.path() == GEO_PATH && r.url.query_pairs().any(|(k, v)| k == "q" && v == "Paris")
        })
        .count();
    assert!(
        paris_refreshes >= 2,
        "expected Paris to keep refreshing, saw {paris_refreshes} geocode calls"
    );
}

#[tokio::test]
async fn destroy_stops_future_firings() {
    let server = MockServer::start().await;

    mount_city(&server, "London", 51.5).await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("London", 18.0)))
        .mount(&server)
        .await;

    let registry = SdkRegistry::new(polling_config(&server, Duration::from_millis(100))).unwrap();
    let service = registry.resolve("test-key").await.unwrap();
    service.get_weather("London").await.unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(registry.destroy("test-key").await);

    let after_destroy = server.received_requests().await.unwrap().len();
    tokio::time::sleep(Duration::from_millis(400)).await;
    let later = server.received_requests().await.unwrap().len();

    assert_eq!(after_destroy, later, "poller kept firing after destroy");
}

#[tokio::test]
async fn firing_over_an_empty_cache_makes_no_requests() {
    let server = MockServer::start().await;

    let registry = SdkRegistry::new(polling_config(&server, Duration::from_millis(100))).unwrap();
    let _service = registry.resolve("test-key").await.unwrap();

    // Several firings pass with nothing cached.
    tokio::time::sleep(Duration::from_millis(350)).await;
    registry.destroy("test-key").await;

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn shutdown_is_idempotent_in_polling_mode() {
    let server = MockServer::start().await;

    let registry = SdkRegistry::new(polling_config(&server, Duration::from_millis(100))).unwrap();
    let service = registry.resolve("test-key").await.unwrap();

    service.shutdown().await;
    service.shutdown().await;

    assert!(service.cached_cities().await.is_empty());
}
