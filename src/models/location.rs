use serde::Serialize;

use crate::clients::geocode::GeoResult;

/// A geocoded place. Created exactly once per unique query text; once stored,
/// never refetched (coordinates do not go stale at operational timescales).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Assigned by the store on insert; 0 until then.
    pub id: i32,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn from_geocode(query: &str, hit: &GeoResult) -> Self {
        Self {
            id: 0,
            search_query: query.to_string(),
            formatted_query: hit.formatted_address.clone().unwrap_or_default(),
            latitude: hit.geometry.location.lat,
            longitude: hit.geometry.location.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::geocode::{GeoPoint, Geometry};

    fn sample() -> GeoResult {
        GeoResult {
            formatted_address: Some("Seattle, WA, USA".to_string()),
            geometry: Geometry {
                location: GeoPoint {
                    lat: 47.6062,
                    lng: -122.3321,
                },
            },
        }
    }

    #[test]
    fn maps_geocode_result() {
        let loc = Location::from_geocode("seattle", &sample());
        assert_eq!(loc.id, 0);
        assert_eq!(loc.search_query, "seattle");
        assert_eq!(loc.formatted_query, "Seattle, WA, USA");
        assert!((loc.latitude - 47.6062).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_formatted_address_maps_to_empty() {
        let mut raw = sample();
        raw.formatted_address = None;
        let loc = Location::from_geocode("seattle", &raw);
        assert_eq!(loc.formatted_query, "");
    }

    #[test]
    fn mapping_is_idempotent() {
        let raw = sample();
        assert_eq!(
            Location::from_geocode("seattle", &raw),
            Location::from_geocode("seattle", &raw)
        );
    }
}
