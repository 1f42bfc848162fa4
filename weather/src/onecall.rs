// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  constants::{EXCLUDE, UNITS, WEATHER_API},
  http,
  models::WeatherReport,
};
use async_trait::async_trait;
use config::config::DEFAULT_WEATHER_URL;
use error::Error;
use reqwest::Client;
use tracing::instrument;
use url::Url;

#[async_trait]
pub trait CurrentWeather: Send + Sync {
  async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, Error>;
}

/// Client for the OpenWeather One Call endpoint, current conditions only.
#[derive(Clone)]
pub struct OneCallClient {
  api_key: String,
  base_url: String,
  http: Client,
}

impl OneCallClient {
  pub fn new(api_key: impl Into<String>, http: Client) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: DEFAULT_WEATHER_URL.to_string(),
      http,
    }
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  fn build_url(&self, latitude: f64, longitude: f64) -> Result<Url, Error> {
    let (lat, lon) = (latitude.to_string(), longitude.to_string());
    Url::parse_with_params(
      &self.base_url,
      &[
        ("lat", lat.as_str()),
        ("lon", lon.as_str()),
        ("units", UNITS),
        ("exclude", EXCLUDE),
        ("appid", self.api_key.as_str()),
      ],
    )
    .map_err(|e| Error::ConfigError(format!("Invalid weather URL {}: {}", self.base_url, e)))
  }
}

#[async_trait]
impl CurrentWeather for OneCallClient {
  #[instrument(skip(self))]
  async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, Error> {
    let url = self.build_url(latitude, longitude)?;
    http::get_json(&self.http, WEATHER_API, url).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_carries_coordinates_units_and_exclusions() {
    let client = OneCallClient::new("weather-key", Client::new());
    let url = client.build_url(48.8588897, -2.320041).unwrap();

    let pairs: Vec<(String, String)> = url
      .query_pairs()
      .map(|(k, v)| (k.into_owned(), v.into_owned()))
      .collect();
    assert_eq!(
      pairs,
      vec![
        ("lat".to_string(), "48.8588897".to_string()),
        ("lon".to_string(), "-2.320041".to_string()),
        ("units".to_string(), "metric".to_string()),
        ("exclude".to_string(), "minutely,hourly,daily,alerts".to_string()),
        ("appid".to_string(), "weather-key".to_string()),
      ]
    );
  }

  #[test]
  fn coordinates_round_trip_exactly() {
    let client = OneCallClient::new("k", Client::new());
    let lat = 51.5073219_f64;
    let url = client.build_url(lat, 0.1).unwrap();
    let sent: f64 = url
      .query_pairs()
      .find(|(k, _)| k == "lat")
      .map(|(_, v)| v.parse().unwrap())
      .unwrap();
    assert_eq!(sent, lat);
  }
}
