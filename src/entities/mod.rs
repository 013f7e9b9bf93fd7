pub mod prelude;

pub mod businesses;
pub mod locations;
pub mod meetup_events;
pub mod movies;
pub mod weather_forecasts;
