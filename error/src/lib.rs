// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("Missing {0} environment variable")]
  MissingEnv(String),
  #[error("Env file not found: {}", .0.display())]
  EnvFileNotFound(PathBuf),
  #[error("Env file error on line {line}: {reason}")]
  EnvFile { line: usize, reason: String },
  #[error("Failed to parse config file: {0}")]
  TomlError(#[from] toml::de::Error),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("{api} API request timed out")]
  Timeout { api: &'static str },
  #[error("{api} API error {code}: {message}")]
  Upstream {
    api: &'static str,
    code: i64,
    message: String,
  },
  #[error("{api} API request failed with status {status}: {body}")]
  UpstreamStatus {
    api: &'static str,
    status: u16,
    body: String,
  },
  #[error("Failed to parse {api} response: {reason}")]
  ParseError { api: &'static str, reason: String },
  #[error("No locations found for {0:?}")]
  EmptyResult(String),
  #[error("Invalid city name: {0}")]
  InvalidCity(String),
  #[error("API error: {0}")]
  ApiError(String),
  #[error("Rate limit exceeded")]
  RateLimitExceeded,
  #[error("WebSocket error: {0}")]
  WebSocket(Box<tokio_tungstenite::tungstenite::Error>),
  #[error("Failed to establish connection: {0}")]
  ConnectionFailed(String),
  #[error("Max reconnection attempts reached")]
  MaxReconnectAttempts,
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
  fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
    Error::WebSocket(Box::new(err))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upstream_error_display_names_api() {
    let err = Error::Upstream {
      api: "weather",
      code: 401,
      message: "Invalid API key".into(),
    };
    assert_eq!(err.to_string(), "weather API error 401: Invalid API key");
  }

  #[test]
  fn empty_result_display_quotes_location() {
    let err = Error::EmptyResult("Zzznotacity".into());
    assert_eq!(err.to_string(), "No locations found for \"Zzznotacity\"");
  }

  #[test]
  fn missing_env_display() {
    let err = Error::MissingEnv("OPEN_WEATHER_API_KEY".into());
    assert_eq!(
      err.to_string(),
      "Missing OPEN_WEATHER_API_KEY environment variable"
    );
  }
}
