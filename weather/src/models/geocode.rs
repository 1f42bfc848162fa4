// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
  pub name: String,
  #[serde(rename = "lat")]
  pub latitude: f64,
  #[serde(rename = "lon")]
  pub longitude: f64,
  pub country: String,
  #[serde(default)]
  pub state: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_direct_geocoding_payload() {
    let body = r#"[
      {
        "name": "London",
        "local_names": {"en": "London", "fr": "Londres"},
        "lat": 51.5073219,
        "lon": -0.1276474,
        "country": "GB",
        "state": "England"
      },
      {
        "name": "London",
        "lat": 42.9832406,
        "lon": -81.243372,
        "country": "CA",
        "state": "Ontario"
      }
    ]"#;

    let matches: Vec<GeocodeMatch> = serde_json::from_str(body).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].country, "GB");
    assert_eq!(matches[0].latitude, 51.5073219);
    assert_eq!(matches[1].state, "Ontario");
  }

  #[test]
  fn state_is_optional() {
    let m: GeocodeMatch =
      serde_json::from_str(r#"{"name":"Paris","lat":48.85,"lon":2.35,"country":"FR"}"#).unwrap();
    assert_eq!(m.state, "");
  }

  #[test]
  fn survives_encode_decode() {
    let original = GeocodeMatch {
      name: "Zürich".into(),
      latitude: 47.3744489,
      longitude: 8.5410422,
      country: "CH".into(),
      state: "Zurich".into(),
    };
    let encoded = serde_json::to_string(&original).unwrap();
    let decoded: GeocodeMatch = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, original);
  }
}
