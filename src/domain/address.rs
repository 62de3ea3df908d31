use serde::Serialize;

/// An administrative subdivision attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminLevel {
    pub name: String,
    pub code: String,
    pub level: u8,
}

impl AdminLevel {
    pub fn new(name: impl Into<String>, code: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            level,
        }
    }
}

/// Rectangular extent of a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }
}

/// Provider-agnostic address record.
///
/// Created with every semantic field absent (the default result shape) and then
/// selectively overwritten while a single feature is normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRecord {
    pub provided_by: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub bounds: Option<Bounds>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    /// In the order they were encountered, duplicates kept
    pub admin_levels: Vec<AdminLevel>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub timezone: Option<String>,
}

impl AddressRecord {
    /// The default result: coordinates set, everything else absent.
    pub fn new(provided_by: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            provided_by,
            latitude,
            longitude,
            bounds: None,
            street_number: None,
            street_name: None,
            postal_code: None,
            locality: None,
            sub_locality: None,
            admin_levels: Vec::new(),
            country: None,
            country_code: None,
            timezone: None,
        }
    }

    /// One-line address, e.g. `"Main Street, 10115 Berlin, Berlin, Germany"`.
    pub fn formatted(&self) -> String {
        let street = match (&self.street_number, &self.street_name) {
            (Some(number), Some(name)) => Some(format!("{} {}", number, name)),
            (None, Some(name)) => Some(name.clone()),
            _ => None,
        };
        let city = match (&self.postal_code, &self.locality) {
            (Some(code), Some(locality)) => Some(format!("{} {}", code, locality)),
            (Some(code), None) => Some(code.clone()),
            (None, Some(locality)) => Some(locality.clone()),
            (None, None) => None,
        };
        let region = self.admin_levels.first().map(|a| a.name.clone());

        [street, city, region, self.country.clone()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = AddressRecord::new("mapbox", 1.0, 2.0);
        assert_eq!(record.provided_by, "mapbox");
        assert_eq!(record.latitude, 1.0);
        assert_eq!(record.longitude, 2.0);
        assert!(record.bounds.is_none());
        assert!(record.admin_levels.is_empty());
        assert!(record.country.is_none());
        assert_eq!(record.formatted(), "");
    }

    #[test]
    fn test_formatted_skips_missing_parts() {
        let mut record = AddressRecord::new("mapbox", 0.0, 0.0);
        record.street_name = Some("Unter den Linden".to_string());
        record.locality = Some("Berlin".to_string());
        record.admin_levels.push(AdminLevel::new("Berlin", "", 1));
        record.country = Some("Germany".to_string());
        assert_eq!(
            record.formatted(),
            "Unter den Linden, Berlin, Berlin, Germany"
        );

        record.postal_code = Some("10117".to_string());
        assert_eq!(
            record.formatted(),
            "Unter den Linden, 10117 Berlin, Berlin, Germany"
        );
    }
}
