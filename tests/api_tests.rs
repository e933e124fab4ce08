//! HTTP client tests against a wiremock server

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use skycast::api::{ApiError, GeocodingClient, USER_AGENT, WeatherClient};
use skycast::model::Place;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.41,
        "timezone": "Europe/Berlin",
        "current": {
            "time": "2025-11-12T14:00",
            "temperature_2m": 8.4,
            "relative_humidity_2m": 76,
            "apparent_temperature": 5.9,
            "is_day": 1,
            "weather_code": 3,
            "wind_speed_10m": 17.3
        },
        "hourly": {
            "time": ["2025-11-12T14:00", "2025-11-12T15:00"],
            "temperature_2m": [8.4, 8.1],
            "weather_code": [3, 61],
            "is_day": [1, 1]
        },
        "daily": {
            "time": ["2025-11-12", "2025-11-13"],
            "weather_code": [61, 3],
            "temperature_2m_max": [9.1, 7.4],
            "temperature_2m_min": [4.0, 2.2]
        }
    })
}

#[tokio::test]
async fn test_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(mock_server.uri(), mock_server.uri());
    let weather = client.forecast(52.52, 13.41).await.unwrap();

    assert_eq!(weather.timezone, "Europe/Berlin");
    assert_eq!(weather.current.humidity, 76);
    assert_eq!(weather.current.weather_code, 3);
    assert_eq!(weather.hourly_rows().len(), 2);
    assert_eq!(weather.upcoming_days().len(), 1);
    assert_eq!(weather.today_high_low(), Some((9.1, 4.0)));
}

#[tokio::test]
async fn test_forecast_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(mock_server.uri(), mock_server.uri());
    let err = client.forecast(0.0, 0.0).await.unwrap_err();

    assert!(matches!(err, ApiError::Status(StatusCode::SERVICE_UNAVAILABLE)));
    assert_eq!(err.weather_message(), "Error: 503 Service Unavailable");
}

#[tokio::test]
async fn test_forecast_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "oops": true })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(mock_server.uri(), mock_server.uri());
    let err = client.forecast(0.0, 0.0).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_air_quality_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .and(query_param("latitude", "52.52"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "us_aqi": 57,
                "pm2_5": 13.2,
                "pm10": 19.8,
                "carbon_monoxide": 233.0,
                "nitrogen_dioxide": 21.5,
                "sulphur_dioxide": 3.1,
                "ozone": 35.0
            }
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(mock_server.uri(), mock_server.uri());
    let response = client.air_quality(52.52, 13.41).await.unwrap();

    assert_eq!(response.current.us_aqi, 57);
    assert_eq!(response.current.no2, 21.5);
    assert_eq!(response.current.level().label(), "Moderate");
}

#[tokio::test]
async fn test_search_returns_top_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "New York"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "40.7127281",
                "lon": "-74.0060152",
                "display_name": "City of New York, New York, United States"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let place = client.search("New York").await.unwrap();

    assert_eq!(
        place,
        Place {
            name: "City of New York, New York, United States".into(),
            lat: 40.7127281,
            lon: -74.0060152,
        }
    );
}

#[tokio::test]
async fn test_search_empty_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let err = client.search("Atlantis").await.unwrap_err();

    assert!(matches!(&err, ApiError::NotFound(city) if city == "Atlantis"));
    assert_eq!(err.search_message(), "City not found: Atlantis");
}

#[tokio::test]
async fn test_search_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let err = client.search("Paris").await.unwrap_err();

    assert_eq!(err.search_message(), "Search error: 429 Too Many Requests");
}

#[tokio::test]
async fn test_search_unreachable_server() {
    // Nothing listens on the discard port
    let client = GeocodingClient::new("http://127.0.0.1:9").unwrap();
    let err = client.search("Paris").await.unwrap_err();

    assert!(matches!(err, ApiError::Request(_)));
    assert!(err.search_message().starts_with("Search network error"));
}

#[tokio::test]
async fn test_reverse_geocode_place_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Mitte, Berlin, Germany",
            "address": {
                "city": "Berlin",
                "country_code": "de"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let response = client.reverse(52.52, 13.41).await.unwrap();

    assert_eq!(response.place_name().as_deref(), Some("Mitte, Berlin, Germany"));
}

#[tokio::test]
async fn test_reverse_geocode_address_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {
                "village": "Grindelwald",
                "country_code": "ch"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let response = client.reverse(46.62, 8.04).await.unwrap();

    assert_eq!(response.place_name().as_deref(), Some("Grindelwald, CH"));
}

#[tokio::test]
async fn test_reverse_geocode_without_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Unable to geocode"
        })))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(mock_server.uri()).unwrap();
    let response = client.reverse(0.0, 0.0).await.unwrap();

    assert_eq!(response.place_name(), None);
}
