use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use citypulse::config::Config;
use citypulse::models::location::Location;
use citypulse::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "test-key";

fn test_config(mock_uri: &str) -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;

    let providers = &mut config.providers;
    providers.geocode_url = mock_uri.to_string();
    providers.geocode_api_key = TEST_KEY.to_string();
    providers.weather_url = mock_uri.to_string();
    providers.weather_api_key = TEST_KEY.to_string();
    providers.yelp_url = mock_uri.to_string();
    providers.yelp_api_key = TEST_KEY.to_string();
    providers.movie_url = mock_uri.to_string();
    providers.movie_api_key = TEST_KEY.to_string();
    providers.meetup_url = mock_uri.to_string();
    providers.meetup_api_key = TEST_KEY.to_string();

    config
}

async fn spawn_app(mock_uri: &str) -> (Router, Arc<AppState>) {
    let state = AppState::from_config(test_config(mock_uri), None)
        .await
        .expect("Failed to create app state");
    (citypulse::api::router(state.clone()), state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn seed_location(state: &AppState) -> Location {
    let mut location = Location {
        id: 0,
        search_query: "seattle".to_string(),
        formatted_query: "Seattle, WA, USA".to_string(),
        latitude: 47.6062,
        longitude: -122.3321,
    };
    location.id = state.store.insert_location(&location).await.unwrap();
    location
}

#[tokio::test]
async fn location_is_geocoded_once_then_served_from_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": 47.6062, "lng": -122.3321 } }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _state) = spawn_app(&mock_server.uri()).await;

    let (status, body) = get_json(&app, "/location?data=Seattle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["formatted_query"], "Seattle, WA, USA");
    let first_id = body["data"]["id"].as_i64().unwrap();
    assert!(first_id > 0);

    // Second call must be served from the store; expect(1) enforces it.
    let (status, body) = get_json(&app, "/location?data=Seattle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), first_id);
}

#[tokio::test]
async fn unknown_place_is_404_and_creates_no_row() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;

    let (status, body) = get_json(&app, "/location?data=Nowhereville").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let row = state
        .store
        .find_location_by_query("Nowhereville")
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn blank_location_query_is_rejected() {
    let mock_server = MockServer::start().await;
    let (app, _state) = spawn_app(&mock_server.uri()).await;

    let (status, body) = get_json(&app, "/location?data=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn weather_miss_persists_in_provider_order_then_hits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{TEST_KEY}/47.6062,-122.3321")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": { "data": [
                { "time": 0, "summary": "Clear" },
                { "time": 86400, "summary": "Rain" },
                { "time": 172800, "summary": "Snow" }
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;
    let location = seed_location(&state).await;

    let uri = format!(
        "/weather?id={}&latitude={}&longitude={}",
        location.id, location.latitude, location.longitude
    );

    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let summaries: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["forecast"].as_str().unwrap())
        .collect();
    assert_eq!(summaries, ["Clear", "Rain", "Snow"]);
    assert_eq!(body["data"][0]["time"], "Thu Jan 01 1970");

    let stored = state.store.forecasts_for_location(location.id).await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].forecast, "Clear");

    // Second call inside the window is a hit; expect(1) enforces no refetch.
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn movie_image_url_falls_back_to_bare_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "title": "Sleepless in Seattle",
                    "popularity": 12.3,
                    "release_date": "1993-06-25",
                    "poster_path": "/abc123.jpg"
                },
                {
                    "title": "Obscure Indie Film",
                    "popularity": 0.4,
                    "release_date": null,
                    "poster_path": null
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;
    let location = seed_location(&state).await;

    let (status, body) = get_json(
        &app,
        &format!("/movies?id={}&data=seattle", location.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let image_base = &state.config.providers.movie_image_base;
    assert_eq!(
        body["data"][0]["image_url"],
        format!("{image_base}/abc123.jpg")
    );
    assert_eq!(body["data"][1]["image_url"], *image_base);
}

#[tokio::test]
async fn yelp_provider_failure_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;
    let location = seed_location(&state).await;

    let (status, body) = get_json(
        &app,
        &format!(
            "/yelp?id={}&latitude={}&longitude={}",
            location.id, location.latitude, location.longitude
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    // The provider's body must not leak to the client.
    assert!(!body["error"].as_str().unwrap().contains("exploded"));
}

#[tokio::test]
async fn multibyte_provider_error_body_still_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    // byte 256 of the error body falls inside the euro sign
    let mut error_body = "x".repeat(255);
    error_body.push_str("€€€ upstream exploded");

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string(error_body))
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;
    let location = seed_location(&state).await;

    let (status, body) = get_json(
        &app,
        &format!(
            "/yelp?id={}&latitude={}&longitude={}",
            location.id, location.latitude, location.longitude
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn meetups_map_creation_date_from_milliseconds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/open_events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "event_url": "https://meetup.example/rustaceans",
                "name": "Rustaceans",
                "created": 1557014400000_i64,
                "group": { "name": "Seattle Rust" }
            }]
        })))
        .mount(&mock_server)
        .await;

    let (app, state) = spawn_app(&mock_server.uri()).await;
    let location = seed_location(&state).await;

    let (status, body) = get_json(
        &app,
        &format!(
            "/meetups?id={}&latitude={}&longitude={}",
            location.id, location.latitude, location.longitude
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["creation_date"], "Sun May 05 2019");
    assert_eq!(body["data"][0]["host"], "Seattle Rust");
}

#[tokio::test]
async fn health_reports_database_status() {
    let mock_server = MockServer::start().await;
    let (app, _state) = spawn_app(&mock_server.uri()).await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], json!(true));
    assert!(body["data"]["version"].is_string());
}
