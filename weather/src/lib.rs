// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod geocoding;
mod http;
pub mod models;
pub mod onecall;
pub mod service;

pub use error::Error;
pub use geocoding::{Geocoder, GeocodingClient};
pub use models::{ApiError, CityWeather, Condition, CurrentConditions, GeocodeMatch, WeatherReport};
pub use onecall::{CurrentWeather, OneCallClient};
pub use service::{failure_reply, WeatherService};

pub mod constants {
  pub const GEOCODING_API: &str = "geocoding";
  pub const WEATHER_API: &str = "weather";
  pub(crate) const UNITS: &str = "metric";
  pub(crate) const EXCLUDE: &str = "minutely,hourly,daily,alerts";
  pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;
  pub(crate) const USER_AGENT: &str = concat!("weatherbot/", env!("CARGO_PKG_VERSION"));
}
