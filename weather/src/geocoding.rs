// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{constants::GEOCODING_API, http, models::GeocodeMatch};
use async_trait::async_trait;
use config::config::{DEFAULT_GEOCODE_LIMIT, DEFAULT_GEOCODING_URL};
use error::Error;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

#[async_trait]
pub trait Geocoder: Send + Sync {
  /// Resolves free text to candidate places, best match first. May be empty.
  async fn geocode(&self, location: &str) -> Result<Vec<GeocodeMatch>, Error>;
}

/// Client for the OpenWeather direct geocoding endpoint.
#[derive(Clone)]
pub struct GeocodingClient {
  api_key: String,
  base_url: String,
  limit: u8,
  http: Client,
}

impl GeocodingClient {
  pub fn new(api_key: impl Into<String>, http: Client) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: DEFAULT_GEOCODING_URL.to_string(),
      limit: DEFAULT_GEOCODE_LIMIT,
      http,
    }
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn with_limit(mut self, limit: u8) -> Self {
    self.limit = limit;
    self
  }

  fn build_url(&self, location: &str) -> Result<Url, Error> {
    let limit = self.limit.to_string();
    Url::parse_with_params(
      &self.base_url,
      &[
        ("q", location),
        ("limit", limit.as_str()),
        ("appid", self.api_key.as_str()),
      ],
    )
    .map_err(|e| Error::ConfigError(format!("Invalid geocoding URL {}: {}", self.base_url, e)))
  }
}

#[async_trait]
impl Geocoder for GeocodingClient {
  #[instrument(skip(self))]
  async fn geocode(&self, location: &str) -> Result<Vec<GeocodeMatch>, Error> {
    let url = self.build_url(location)?;
    let matches: Vec<GeocodeMatch> = http::get_json(&self.http, GEOCODING_API, url).await?;
    debug!("Geocoding returned {} matches", matches.len());
    Ok(matches)
  }
}
