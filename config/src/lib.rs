// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod config;

pub use crate::config::{Config, Settings, SlackCredentials};

pub mod env {
  pub const GEOCODING_API_KEY: &str = "OPEN_WEATHER_GEOCODING_API_KEY";
  pub const WEATHER_API_KEY: &str = "OPEN_WEATHER_API_KEY";
  pub const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
  pub const SLACK_APP_TOKEN: &str = "SLACK_APP_TOKEN";
  pub const CONFIG_PATH: &str = "WEATHERBOT_CONFIG";
}

pub const DEFAULT_CONFIG_PATH: &str = "weatherbot.toml";
