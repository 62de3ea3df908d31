use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use std::net::IpAddr;

use crate::config::MapboxConfig;
use crate::error::GeocodeError;

/// Everything except RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Format a coordinate pair as the `"{lat},{lon}"` query used for reverse lookups.
pub fn coordinate_query(latitude: f64, longitude: f64) -> String {
    format!("{:.6},{:.6}", latitude, longitude)
}

/// Build the full geocoding URL for `input`.
///
/// The input becomes a percent-encoded path segment of the
/// `/geocoding/v5/{dataset}/{input}.json` endpoint. Reverse lookups pass the
/// output of [`coordinate_query`] here as well.
///
/// # Arguments
/// * `input` - Free-form address or `"{lat},{lon}"` pair
/// * `config` - Scheme, host, dataset and the optional `country` and
///   `access_token` parameters, which are only appended when set
///
/// # Returns
/// * `Ok(url)` - Fully qualified query URL
/// * `Err(GeocodeError::UnsupportedInput)` - If `input` is an IP literal
pub fn build_url(input: &str, config: &MapboxConfig) -> Result<String, GeocodeError> {
    if input.trim().parse::<IpAddr>().is_ok() {
        return Err(GeocodeError::UnsupportedInput {
            input: input.to_string(),
        });
    }

    let base = format!(
        "{}://{}/geocoding/v5/{}/{}.json",
        config.scheme(),
        config.host,
        config.dataset.as_str(),
        utf8_percent_encode(input, COMPONENT)
    );
    let mut url = Url::parse(&base).map_err(|e| {
        log::debug!("Cannot build request URL {:?}: {}", base, e);
        GeocodeError::UnsupportedInput {
            input: input.to_string(),
        }
    })?;

    if let Some(country) = &config.country {
        url.query_pairs_mut().append_pair("country", country);
    }
    if let Some(token) = &config.access_token {
        url.query_pairs_mut().append_pair("access_token", token);
    }

    Ok(url.to_string())
}

/// Replace the `access_token` value in a URL so it can be logged or displayed.
pub fn redact_token(url: &str) -> String {
    const KEY: &str = "access_token=";

    let Some(start) = url.find(KEY).map(|i| i + KEY.len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map_or(url.len(), |i| start + i);

    format!("{}***{}", &url[..start], &url[end..])
}
