// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  constants::{GEOCODING_API, WEATHER_API},
  geocoding::{Geocoder, GeocodingClient},
  http,
  models::CityWeather,
  onecall::{CurrentWeather, OneCallClient},
};
use config::Config;
use error::Error;
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{info, instrument, warn};

/// Geocodes a location, then fetches current weather for the first match.
#[derive(Clone)]
pub struct WeatherService {
  geocoder: Arc<dyn Geocoder>,
  weather: Arc<dyn CurrentWeather>,
  timeout: Duration,
}

impl WeatherService {
  pub fn new(
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn CurrentWeather>,
    timeout: Duration,
  ) -> Self {
    Self {
      geocoder,
      weather,
      timeout,
    }
  }

  #[instrument(skip(config))]
  pub fn from_config(config: &Config) -> Result<Self, Error> {
    let settings = &config.settings;
    let client = http::client(settings.request_timeout())?;

    let geocoder = GeocodingClient::new(config.geocoding_api_key.clone(), client.clone())
      .with_base_url(settings.geocoding_url.clone())
      .with_limit(settings.geocode_limit);
    let weather = OneCallClient::new(config.weather_api_key.clone(), client)
      .with_base_url(settings.weather_url.clone());

    Ok(Self::new(
      Arc::new(geocoder),
      Arc::new(weather),
      settings.request_timeout(),
    ))
  }

  #[instrument(skip(self))]
  pub async fn lookup(&self, location: &str) -> Result<CityWeather, Error> {
    let location = location.trim();
    if location.is_empty() {
      return Err(Error::InvalidCity("City name cannot be empty".into()));
    }
    if !location.chars().any(char::is_alphanumeric) {
      return Err(Error::InvalidCity(format!("{location:?} is not a city name")));
    }

    let matches = self
      .bounded(GEOCODING_API, self.geocoder.geocode(location))
      .await?;
    let place = matches
      .into_iter()
      .next()
      .ok_or_else(|| Error::EmptyResult(location.to_string()))?;
    info!(
      "Resolved {:?} to {}, {} ({}, {})",
      location, place.name, place.country, place.latitude, place.longitude
    );

    let report = self
      .bounded(
        WEATHER_API,
        self.weather.current(place.latitude, place.longitude),
      )
      .await?;

    Ok(CityWeather { place, report })
  }

  /// Always produces a sentence for the user, success or not.
  pub async fn reply(&self, location: &str) -> String {
    match self.lookup(location).await {
      Ok(city) => city.to_string(),
      Err(e) => {
        warn!("Weather lookup for {:?} failed: {}", location, e);
        failure_reply(&e, location.trim())
      }
    }
  }

  async fn bounded<T, F>(&self, api: &'static str, call: F) -> Result<T, Error>
  where
    F: Future<Output = Result<T, Error>>,
  {
    tokio::time::timeout(self.timeout, call)
      .await
      .map_err(|_| Error::Timeout { api })?
  }
}

pub fn failure_reply(err: &Error, location: &str) -> String {
  match err {
    Error::InvalidCity(_) => {
      "Please tell me which city you'd like the weather for, e.g. \"What is the weather in Paris\"."
        .to_string()
    }
    Error::EmptyResult(_) => format!("Sorry, I couldn't find a place called \"{location}\"."),
    Error::Upstream { api, code, .. } => match code {
      401 | 403 => format!("Sorry, the {api} service rejected the bot's credentials."),
      429 => format!("Sorry, the {api} service is busy right now. Please try again later."),
      400..=499 => format!("Sorry, the {api} service couldn't handle that request."),
      _ => format!("Sorry, the {api} service returned an error. Please try again later."),
    },
    Error::UpstreamStatus { api, .. } => {
      format!("Sorry, the {api} service is unavailable right now. Please try again later.")
    }
    Error::Timeout { api } => {
      format!("Sorry, the {api} service took too long to respond. Please try again later.")
    }
    Error::HttpError(_) => {
      "Sorry, I couldn't reach the weather service. Please try again later.".to_string()
    }
    Error::ParseError { api, .. } => {
      format!("Sorry, I couldn't understand the response from the {api} service.")
    }
    _ => "Sorry, something went wrong while looking up the weather.".to_string(),
  }
}
