// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  constants::{MAX_ERROR_BODY_CHARS, USER_AGENT},
  models::ApiError,
};
use error::Error;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub(crate) fn client(timeout: Duration) -> Result<Client, Error> {
  Client::builder()
    .timeout(timeout)
    .user_agent(USER_AGENT)
    .build()
    .map_err(Error::HttpError)
}

/// Sends a GET and decodes a 200 body as `T`, or the error body as [`ApiError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
  client: &Client,
  api: &'static str,
  url: Url,
) -> Result<T, Error> {
  let response = client
    .get(url)
    .send()
    .await
    .map_err(|e| transport_error(api, e))?;

  let status = response.status();
  let body = response
    .text()
    .await
    .map_err(|e| transport_error(api, e))?;
  debug!(api, %status, bytes = body.len(), "Received response");

  if status != StatusCode::OK {
    let err = upstream_error(api, status, &body);
    warn!("{}", err);
    return Err(err);
  }

  serde_json::from_str(&body).map_err(|e| {
    warn!(api, "Failed to decode response: {}", e);
    Error::ParseError {
      api,
      reason: e.to_string(),
    }
  })
}

fn transport_error(api: &'static str, err: reqwest::Error) -> Error {
  warn!(api, "Request failed: {}", err);
  if err.is_timeout() {
    Error::Timeout { api }
  } else {
    Error::HttpError(err.without_url())
  }
}

pub(crate) fn upstream_error(api: &'static str, status: StatusCode, body: &str) -> Error {
  match serde_json::from_str::<ApiError>(body) {
    Ok(api_error) => Error::Upstream {
      api,
      code: api_error.code,
      message: api_error.message,
    },
    Err(_) => Error::UpstreamStatus {
      api,
      status: status.as_u16(),
      body: truncate_body(body),
    },
  }
}

fn truncate_body(body: &str) -> String {
  if body.chars().count() > MAX_ERROR_BODY_CHARS {
    let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{head}...")
  } else {
    body.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodable_error_body_becomes_upstream_error() {
    let err = upstream_error(
      "weather",
      StatusCode::UNAUTHORIZED,
      r#"{"cod":401,"message":"Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."}"#,
    );
    match err {
      Error::Upstream { api, code, message } => {
        assert_eq!(api, "weather");
        assert_eq!(code, 401);
        assert!(message.starts_with("Invalid API key"));
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn undecodable_error_body_keeps_status() {
    let err = upstream_error("geocoding", StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
    match err {
      Error::UpstreamStatus { status, body, .. } => {
        assert_eq!(status, 502);
        assert_eq!(body, "<html>Bad Gateway</html>");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn long_bodies_are_truncated_on_char_boundaries() {
    let body = "é".repeat(MAX_ERROR_BODY_CHARS + 10);
    let truncated = truncate_body(&body);
    assert!(truncated.ends_with("..."));
    assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
  }
}
