// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::geocode::GeocodeMatch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One Call response trimmed to the `current` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
  #[serde(rename = "lat", default)]
  pub latitude: f64,
  #[serde(rename = "lon", default)]
  pub longitude: f64,
  #[serde(default)]
  pub timezone: String,
  pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
  #[serde(rename = "temp")]
  pub temperature: f64,
  #[serde(default)]
  pub feels_like: f64,
  #[serde(rename = "weather", default)]
  pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
  pub id: i64,
  pub main: String,
  pub description: String,
  pub icon: String,
}

/// The resolved place together with its current weather.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
  pub place: GeocodeMatch,
  pub report: WeatherReport,
}

impl fmt::Display for CityWeather {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "The current weather temperature in {} is {:.6}.",
      self.place.name, self.report.current.temperature
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paris() -> GeocodeMatch {
    GeocodeMatch {
      name: "Paris".into(),
      latitude: 48.85,
      longitude: 2.35,
      country: "FR".into(),
      state: String::new(),
    }
  }

  #[test]
  fn decodes_onecall_payload() {
    let body = r#"{
      "lat": 48.85,
      "lon": 2.35,
      "timezone": "Europe/Paris",
      "timezone_offset": 7200,
      "current": {
        "dt": 1684929490,
        "temp": 18.2,
        "feels_like": 17.6,
        "humidity": 64,
        "weather": [
          {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
        ]
      }
    }"#;

    let report: WeatherReport = serde_json::from_str(body).unwrap();
    assert_eq!(report.timezone, "Europe/Paris");
    assert_eq!(report.current.temperature, 18.2);
    assert_eq!(report.current.feels_like, 17.6);
    assert_eq!(report.current.conditions.len(), 1);
    assert_eq!(report.current.conditions[0].main, "Clouds");
  }

  #[test]
  fn only_current_temperature_is_required() {
    let report: WeatherReport = serde_json::from_str(r#"{"current":{"temp":-3.5}}"#).unwrap();
    assert_eq!(report.current.temperature, -3.5);
    assert!(report.current.conditions.is_empty());
    assert!(report.timezone.is_empty());
  }

  #[test]
  fn missing_current_block_is_rejected() {
    assert!(serde_json::from_str::<WeatherReport>(r#"{"lat":1.0,"lon":2.0}"#).is_err());
  }

  #[test]
  fn survives_encode_decode() {
    let original = WeatherReport {
      latitude: 48.85,
      longitude: 2.35,
      timezone: "Europe/Paris".into(),
      current: CurrentConditions {
        temperature: 18.2,
        feels_like: 17.9,
        conditions: vec![Condition {
          id: 500,
          main: "Rain".into(),
          description: "light rain".into(),
          icon: "10d".into(),
        }],
      },
    };
    let encoded = serde_json::to_string(&original).unwrap();
    let decoded: WeatherReport = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, original);
  }

  #[test]
  fn summary_uses_six_decimals() {
    let city = CityWeather {
      place: paris(),
      report: serde_json::from_str(r#"{"current":{"temp":18.2}}"#).unwrap(),
    };
    assert_eq!(
      city.to_string(),
      "The current weather temperature in Paris is 18.200000."
    );
  }
}
