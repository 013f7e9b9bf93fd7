use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::yelp::YelpBusiness;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub rating: f64,
    pub price: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub location_id: i32,
}

impl Business {
    #[must_use]
    pub fn from_provider(raw: &YelpBusiness, location_id: i32, fetched_at: DateTime<Utc>) -> Self {
        Self {
            name: raw.name.clone(),
            rating: raw.rating.unwrap_or_default(),
            price: raw.price.clone(),
            url: raw.url.clone(),
            image_url: raw.image_url.clone(),
            created_at: fetched_at,
            location_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optional_fields_stay_absent() {
        let raw = YelpBusiness {
            name: "Pike Place Chowder".to_string(),
            rating: Some(4.5),
            price: None,
            url: None,
            image_url: None,
        };
        let business = Business::from_provider(&raw, 3, Utc::now());
        assert_eq!(business.name, "Pike Place Chowder");
        assert!((business.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(business.price, None);
        assert_eq!(business.url, None);
    }
}
