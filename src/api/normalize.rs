use crate::api::mapbox::PROVIDER_NAME;
use crate::api::response::Feature;
use crate::domain::{AddressRecord, AdminLevel, Bounds, ContextEntry, PlaceType};
use crate::error::GeocodeError;

/// The feature itself followed by its context items, in response order.
pub fn context_entries(feature: &Feature) -> Vec<ContextEntry> {
    let mut entries = Vec::with_capacity(feature.context.len() + 1);

    entries.push(ContextEntry::new(
        &feature.id,
        &feature.text,
        feature.short_code.as_deref(),
        feature.properties.as_ref(),
    ));
    entries.extend(feature.context.iter().map(|item| {
        ContextEntry::new(
            &item.id,
            &item.text,
            item.short_code.as_deref(),
            item.properties.as_ref(),
        )
    }));

    entries
}

/// Fold a feature into an address record.
///
/// `coordinates[0]` becomes latitude and `coordinates[1]` longitude; `bbox` is
/// read as south, west, north, east. Both mappings are kept as the provider
/// adapter has always produced them.
///
/// Returns `None` when the feature has no usable coordinate pair.
pub fn normalize(feature: &Feature) -> Option<AddressRecord> {
    let (latitude, longitude) = match feature.geometry.as_ref()?.coordinates.as_slice() {
        [first, second, ..] => (*first, *second),
        _ => return None,
    };

    let mut record = AddressRecord::new(PROVIDER_NAME, latitude, longitude);

    for entry in context_entries(feature) {
        match entry.place_type() {
            Some(PlaceType::Country) => {
                record.country = Some(entry.text);
                record.country_code = entry.short_code;
            }
            Some(PlaceType::Region) => {
                record.admin_levels.push(AdminLevel::new(entry.text, "", 1));
            }
            Some(PlaceType::Postcode) => record.postal_code = Some(entry.text),
            Some(PlaceType::Place | PlaceType::Locality) => record.locality = Some(entry.text),
            Some(PlaceType::Neighborhood) => record.sub_locality = Some(entry.text),
            Some(PlaceType::Address) => record.street_name = Some(entry.text),
            Some(PlaceType::Poi) | None => {
                log::trace!("Ignoring context entry {:?}", entry.id);
            }
        }
    }

    if let Some([south, west, north, east]) = feature.bbox.as_deref() {
        record.bounds = Some(Bounds::new(*south, *west, *north, *east));
    }

    Some(record)
}

/// One record per feature, in provider order. Fails as a whole if any
/// feature lacks coordinates.
pub fn assemble(url: &str, features: &[Feature]) -> Result<Vec<AddressRecord>, GeocodeError> {
    features
        .iter()
        .map(|feature| {
            normalize(feature).ok_or_else(|| {
                GeocodeError::no_result(url, format!("feature {:?} has no coordinates", feature.id))
            })
        })
        .collect()
}
