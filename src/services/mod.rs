pub mod business;
pub mod event;
pub mod location;
pub mod movie;
pub mod weather;

pub use business::BusinessService;
pub use event::EventService;
pub use location::LocationService;
pub use movie::MovieService;
pub use weather::WeatherService;
