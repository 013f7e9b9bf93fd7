use chrono::{DateTime, Utc};
use serde::Serialize;

use super::human_date;
use crate::clients::meetup::OpenEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub link: String,
    pub name: String,
    pub creation_date: String,
    pub host: Option<String>,
    pub created_at: DateTime<Utc>,
    pub location_id: i32,
}

impl Event {
    #[must_use]
    pub fn from_provider(raw: &OpenEvent, location_id: i32, fetched_at: DateTime<Utc>) -> Self {
        Self {
            link: raw.event_url.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            // provider sends milliseconds
            creation_date: raw
                .created
                .map(|ms| human_date(ms / 1000))
                .unwrap_or_default(),
            host: raw.group.as_ref().and_then(|g| g.name.clone()),
            created_at: fetched_at,
            location_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::meetup::EventGroup;

    #[test]
    fn maps_provider_event() {
        let raw = OpenEvent {
            event_url: Some("https://meetup.test/events/1".to_string()),
            name: Some("Rust Seattle".to_string()),
            created: Some(0),
            group: Some(EventGroup {
                name: Some("Seattle Rustaceans".to_string()),
            }),
        };
        let event = Event::from_provider(&raw, 2, Utc::now());
        assert_eq!(event.link, "https://meetup.test/events/1");
        assert_eq!(event.creation_date, "Thu Jan 01 1970");
        assert_eq!(event.host.as_deref(), Some("Seattle Rustaceans"));
    }

    #[test]
    fn missing_group_means_no_host() {
        let raw = OpenEvent {
            event_url: None,
            name: Some("Untitled".to_string()),
            created: None,
            group: None,
        };
        let event = Event::from_provider(&raw, 2, Utc::now());
        assert_eq!(event.host, None);
        assert_eq!(event.creation_date, "");
        assert_eq!(event.link, "");
    }
}
