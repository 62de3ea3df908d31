//! Integration tests for the reqwest transport (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mapbox_geocoder::{
    GeocodeError, GeocodingProvider, HttpTransport, Mapbox, MapboxConfig, RawResponse,
    ReqwestTransport,
};

/// The blocking client must not be created or dropped on an async worker
async fn blocking_get(url: String) -> anyhow::Result<RawResponse> {
    tokio::task::spawn_blocking(move || ReqwestTransport::new(5)?.get(&url))
        .await
        .expect("blocking task panicked")
}

fn config_for_mock(server: &MockServer) -> MapboxConfig {
    MapboxConfig::new(Some("pk.mock".to_string()))
        .with_ssl(false)
        .with_host(server.address().to_string())
        .with_timeout_secs(5)
}

const LONDON: &str = r#"{"type":"FeatureCollection","features":[{
    "id": "address.1",
    "text": "Downing Street",
    "geometry": {"type": "Point", "coordinates": [-0.1276, 51.5034]},
    "context": [
        {"id": "postcode.2", "text": "SW1A 2AA"},
        {"id": "place.3", "text": "London"},
        {"id": "country.4", "text": "United Kingdom", "short_code": "gb"}
    ]
}]}"#;

#[tokio::test(flavor = "multi_thread")]
async fn test_transport_returns_every_status_with_body() {
    let server = MockServer::start().await;

    for (status, route, body) in [
        (200, "/ok", r#"{"features":[]}"#),
        (401, "/unauthorized", r#"{"message":"Not Authorized - Invalid Token"}"#),
        (429, "/limited", r#"{"message":"Too Many Requests"}"#),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
    }

    let response = blocking_get(format!("{}/ok", server.uri())).await.unwrap();
    assert_eq!(response, RawResponse::new(200, r#"{"features":[]}"#));

    let response = blocking_get(format!("{}/unauthorized", server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 401);
    assert!(response.body.contains("Invalid Token"));

    let response = blocking_get(format!("{}/limited", server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 429);
    assert!(response.body.contains("Too Many Requests"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_transport_unreachable_is_err() {
    let result = blocking_get("http://127.0.0.1:1/geocoding".to_string()).await;
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geocode_against_mock_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Downing%20Street.json"))
        .and(query_param("country", "gb"))
        .and(query_param("access_token", "pk.mock"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for_mock(&server).with_country("gb");
    let records = tokio::task::spawn_blocking(move || {
        Mapbox::with_reqwest(config)?
            .geocode("Downing Street")
            .map_err(anyhow::Error::from)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].street_name.as_deref(), Some("Downing Street"));
    assert_eq!(records[0].postal_code.as_deref(), Some("SW1A 2AA"));
    assert_eq!(records[0].locality.as_deref(), Some("London"));
    assert_eq!(records[0].country_code.as_deref(), Some("gb"));
    assert_eq!(records[0].latitude, -0.1276);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geocode_401_and_429_from_mock_server() {
    for (status, expect_quota) in [(401, false), (429, true)] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&server)
            .await;

        let config = config_for_mock(&server);
        let err = tokio::task::spawn_blocking(move || {
            Mapbox::with_reqwest(config).unwrap().geocode("Paris").unwrap_err()
        })
        .await
        .unwrap();

        if expect_quota {
            assert!(matches!(err, GeocodeError::QuotaExceeded { .. }), "{err:?}");
        } else {
            assert!(matches!(err, GeocodeError::InvalidCredentials { .. }), "{err:?}");
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geocode_unreachable_host_is_transport_error() {
    let config = MapboxConfig::default()
        .with_ssl(false)
        .with_host("127.0.0.1:1")
        .with_timeout_secs(5);

    let err = tokio::task::spawn_blocking(move || {
        Mapbox::with_reqwest(config).unwrap().geocode("Paris").unwrap_err()
    })
    .await
    .unwrap();

    match err {
        GeocodeError::Transport { url, .. } => {
            assert_eq!(url, "http://127.0.0.1:1/geocoding/v5/mapbox.places/Paris.json");
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}
