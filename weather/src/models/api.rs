// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{de, Deserialize, Deserializer, Serialize};

/// Error body returned by OpenWeather alongside a non-200 status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
  #[serde(rename = "cod", deserialize_with = "number_or_numeric_string")]
  pub code: i64,
  pub message: String,
}

// OpenWeather sends `cod` as 401 on some endpoints and "400" on others.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Code {
    Number(i64),
    Text(String),
  }

  match Code::deserialize(deserializer)? {
    Code::Number(code) => Ok(code),
    Code::Text(text) => text
      .trim()
      .parse()
      .map_err(|_| de::Error::custom(format!("invalid error code {text:?}"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_numeric_code() {
    let err: ApiError =
      serde_json::from_str(r#"{"cod":401,"message":"Invalid API key"}"#).unwrap();
    assert_eq!(err.code, 401);
    assert_eq!(err.message, "Invalid API key");
  }

  #[test]
  fn decodes_string_code() {
    let err: ApiError =
      serde_json::from_str(r#"{"cod":"400","message":"Nothing to geocode"}"#).unwrap();
    assert_eq!(err.code, 400);
  }

  #[test]
  fn rejects_non_numeric_code() {
    assert!(serde_json::from_str::<ApiError>(r#"{"cod":"oops","message":"x"}"#).is_err());
  }

  #[test]
  fn rejects_body_without_message() {
    assert!(serde_json::from_str::<ApiError>(r#"{"cod":500}"#).is_err());
  }
}
