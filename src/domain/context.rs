use serde_json::{Map, Value};

/// Place classification derived from a context entry id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceType {
    Country,
    Region,
    Postcode,
    Place,
    Locality,
    Neighborhood,
    Address,
    Poi,
}

impl PlaceType {
    /// Classify an id such as `"region.1234"` by the text before its first `.`
    pub fn from_id(id: &str) -> Option<PlaceType> {
        let token = id.split('.').next().unwrap_or(id);
        match token {
            "country" => Some(PlaceType::Country),
            "region" => Some(PlaceType::Region),
            "postcode" => Some(PlaceType::Postcode),
            "place" => Some(PlaceType::Place),
            "locality" => Some(PlaceType::Locality),
            "neighborhood" => Some(PlaceType::Neighborhood),
            "address" => Some(PlaceType::Address),
            "poi" => Some(PlaceType::Poi),
            _ => None,
        }
    }
}

/// One level of a feature's place hierarchy, the feature itself included
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextEntry {
    pub id: String,
    pub text: String,
    pub short_code: Option<String>,
    /// Provider-specific properties, flattened from the `properties` object
    pub extra: Map<String, Value>,
}

impl ContextEntry {
    /// Build an entry and flatten `properties` onto it.
    ///
    /// Property keys land on the entry's own fields: string-valued `id`, `text`
    /// and `short_code` overwrite them, all other keys go to `extra`.
    pub fn new(
        id: &str,
        text: &str,
        short_code: Option<&str>,
        properties: Option<&Map<String, Value>>,
    ) -> Self {
        let mut entry = Self {
            id: id.to_string(),
            text: text.to_string(),
            short_code: short_code.map(str::to_string),
            extra: Map::new(),
        };

        for (key, value) in properties.into_iter().flatten() {
            match (key.as_str(), value.as_str()) {
                ("id", Some(s)) => entry.id = s.to_string(),
                ("text", Some(s)) => entry.text = s.to_string(),
                ("short_code", Some(s)) => entry.short_code = Some(s.to_string()),
                _ => {
                    entry.extra.insert(key.clone(), value.clone());
                }
            }
        }

        entry
    }

    pub fn place_type(&self) -> Option<PlaceType> {
        PlaceType::from_id(&self.id)
    }
}
