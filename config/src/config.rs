// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{env, DEFAULT_CONFIG_PATH};
use error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GEOCODE_LIMIT: u8 = 5;
const MAX_GEOCODE_LIMIT: u8 = 5;

#[derive(Clone)]
pub struct Config {
  pub geocoding_api_key: String,
  pub weather_api_key: String,
  pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  pub request_timeout_secs: u64,
  pub geocode_limit: u8,
  pub geocoding_url: String,
  pub weather_url: String,
}

#[derive(Clone)]
pub struct SlackCredentials {
  pub bot_token: String,
  pub app_token: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
      geocode_limit: DEFAULT_GEOCODE_LIMIT,
      geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
      weather_url: DEFAULT_WEATHER_URL.to_string(),
    }
  }
}

impl Settings {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let settings: Self = toml::from_str(&content)?;
    settings.validate()?;
    tracing::debug!("Loaded settings successfully");
    Ok(settings)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  fn validate(&self) -> Result<(), Error> {
    if self.request_timeout_secs == 0 {
      return Err(Error::ConfigError(
        "request_timeout_secs must be greater than zero".into(),
      ));
    }
    if !(1..=MAX_GEOCODE_LIMIT).contains(&self.geocode_limit) {
      return Err(Error::ConfigError(format!(
        "geocode_limit must be between 1 and {MAX_GEOCODE_LIMIT}, got {}",
        self.geocode_limit
      )));
    }
    Ok(())
  }
}

impl Config {
  /// Reads the API keys from the process environment and the optional settings
  /// file named by `WEATHERBOT_CONFIG` (default `weatherbot.toml`).
  pub fn from_env() -> Result<Self, Error> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
  where
    F: Fn(&str) -> Option<String>,
  {
    let geocoding_api_key = required(&lookup, env::GEOCODING_API_KEY)?;
    let weather_api_key = required(&lookup, env::WEATHER_API_KEY)?;

    let explicit_path = lookup(env::CONFIG_PATH).filter(|p| !p.trim().is_empty());
    let settings = match explicit_path {
      Some(path) => Settings::from_file(path)?,
      None if Path::new(DEFAULT_CONFIG_PATH).exists() => Settings::from_file(DEFAULT_CONFIG_PATH)?,
      None => Settings::default(),
    };

    Ok(Self {
      geocoding_api_key,
      weather_api_key,
      settings,
    })
  }
}

impl SlackCredentials {
  pub fn from_env() -> Result<Self, Error> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
  where
    F: Fn(&str) -> Option<String>,
  {
    Ok(Self {
      bot_token: required(&lookup, env::SLACK_BOT_TOKEN)?,
      app_token: required(&lookup, env::SLACK_APP_TOKEN)?,
    })
  }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, Error>
where
  F: Fn(&str) -> Option<String>,
{
  lookup(key)
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
    .ok_or_else(|| Error::MissingEnv(key.to_string()))
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("geocoding_api_key", &"<redacted>")
      .field("weather_api_key", &"<redacted>")
      .field("settings", &self.settings)
      .finish()
  }
}

impl std::fmt::Debug for SlackCredentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SlackCredentials")
      .field("bot_token", &"<redacted>")
      .field("app_token", &"<redacted>")
      .finish()
  }
}
