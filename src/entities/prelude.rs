pub use super::businesses::Entity as Businesses;
pub use super::locations::Entity as Locations;
pub use super::meetup_events::Entity as MeetupEvents;
pub use super::movies::Entity as Movies;
pub use super::weather_forecasts::Entity as WeatherForecasts;
