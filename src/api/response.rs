use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::api::transport::RawResponse;
use crate::error::GeocodeError;

/// A single geocoding candidate as returned by Mapbox
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Vec<ContextItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

/// An ancestor of a feature (its region, country, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct ContextItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Treat an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decide whether a response carries features or which error it maps to.
///
/// Checked in order: 401, 429, empty body, invalid JSON, then missing or
/// empty `features` or any status other than 200.
pub fn classify(url: &str, response: RawResponse) -> Result<Vec<Feature>, GeocodeError> {
    match response.status {
        401 => {
            return Err(GeocodeError::InvalidCredentials {
                url: url.to_string(),
            });
        }
        429 => {
            return Err(GeocodeError::QuotaExceeded {
                url: url.to_string(),
            });
        }
        _ => {}
    }

    if response.body.trim().is_empty() {
        return Err(GeocodeError::no_result(url, "empty response body"));
    }

    let mut data: Value = serde_json::from_str(&response.body)
        .map_err(|e| GeocodeError::no_result(url, format!("invalid JSON: {}", e)))?;

    let features = match data.get_mut("features").map(Value::take) {
        Some(Value::Array(features)) if !features.is_empty() => features,
        Some(_) => return Err(GeocodeError::no_result(url, "no features")),
        None => return Err(GeocodeError::no_result(url, "missing features")),
    };

    if response.status != 200 {
        return Err(GeocodeError::no_result(
            url,
            format!("HTTP status {}", response.status),
        ));
    }

    features
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Feature>, _>>()
        .map_err(|e| GeocodeError::no_result(url, format!("malformed feature: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places/x.json";

    fn ok(body: &str) -> RawResponse {
        RawResponse::new(200, body)
    }

    fn reason(err: GeocodeError) -> String {
        match err {
            GeocodeError::NoResult { reason, .. } => reason,
            other => panic!("expected NoResult, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_401() {
        let err = classify(URL, RawResponse::new(401, r#"{"features":[{}]}"#)).unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidCredentials { .. }));
        assert_eq!(err.query(), URL);
    }

    #[test]
    fn test_classify_429_with_empty_body() {
        let err = classify(URL, RawResponse::new(429, "")).unwrap_err();
        assert!(matches!(err, GeocodeError::QuotaExceeded { .. }));
    }

    #[test]
    fn test_classify_empty_body() {
        let err = classify(URL, ok("")).unwrap_err();
        assert_eq!(reason(err), "empty response body");
    }

    #[test]
    fn test_classify_invalid_json() {
        let err = classify(URL, ok("<html>oops</html>")).unwrap_err();
        assert!(reason(err).starts_with("invalid JSON"));
    }

    #[test]
    fn test_classify_missing_features() {
        let err = classify(URL, ok(r#"{"message":"Not Found"}"#)).unwrap_err();
        assert_eq!(reason(err), "missing features");
    }

    #[test]
    fn test_classify_empty_features() {
        let err = classify(URL, ok(r#"{"type":"FeatureCollection","features":[]}"#)).unwrap_err();
        assert_eq!(reason(err), "no features");
    }

    #[test]
    fn test_classify_non_200_with_features() {
        let body = r#"{"features":[{"id":"place.1","text":"A"}]}"#;
        let err = classify(URL, RawResponse::new(500, body)).unwrap_err();
        assert_eq!(reason(err), "HTTP status 500");
    }

    #[test]
    fn test_classify_malformed_feature() {
        let body = r#"{"features":[{"id":"place.1","bbox":"nope"}]}"#;
        let err = classify(URL, ok(body)).unwrap_err();
        assert!(reason(err).starts_with("malformed feature"));
    }

    #[test]
    fn test_classify_accepts_null_optional_fields() {
        let body = r#"{"features":[{
            "id": null,
            "text": null,
            "short_code": null,
            "properties": null,
            "bbox": null,
            "geometry": {"coordinates": [1, 2]},
            "context": [{"id": "region.1", "text": null}]
        }]}"#;
        let features = classify(URL, ok(body)).unwrap();
        assert_eq!(features[0].id, "");
        assert_eq!(features[0].text, "");
        assert!(features[0].bbox.is_none());
        assert_eq!(features[0].context[0].text, "");
    }

    #[test]
    fn test_classify_success() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "id": "place.123",
                    "text": "Paris",
                    "geometry": {"type": "Point", "coordinates": [2.35, 48.85]},
                    "bbox": [2.22, 48.81, 2.46, 48.90],
                    "properties": {"wikidata": "Q90"},
                    "context": [
                        {"id": "region.1", "text": "Île-de-France", "short_code": "FR-IDF"},
                        {"id": "country.2", "text": "France", "short_code": "fr"}
                    ]
                },
                {"id": "poi.9", "text": "Paris Café"}
            ]
        }"#;
        let features = classify(URL, ok(body)).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, "place.123");
        assert_eq!(features[0].context.len(), 2);
        assert_eq!(features[0].context[1].short_code.as_deref(), Some("fr"));
        assert_eq!(
            features[0].geometry.as_ref().map(|g| g.coordinates.clone()),
            Some(vec![2.35, 48.85])
        );
        assert!(features[1].geometry.is_none());
        assert!(features[1].context.is_empty());
    }
}
