// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};

/// A user message addressed to the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
  pub channel: String,
  pub user: String,
  pub text: String,
  pub ts: String,
  pub thread_ts: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct PostMessage<'a> {
  pub channel: &'a str,
  pub text: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub thread_ts: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub unfurl_links: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mrkdwn: Option<bool>,
}

#[derive(Deserialize)]
pub(crate) struct SlackResponse {
  pub ok: bool,
  #[serde(default)]
  pub error: String,
}

#[derive(Deserialize)]
pub(crate) struct AuthTestResponse {
  pub ok: bool,
  #[serde(default)]
  pub user_id: Option<String>,
  #[serde(default)]
  pub error: String,
}

#[derive(Deserialize)]
pub(crate) struct ConnectionsOpenResponse {
  pub ok: bool,
  #[serde(default)]
  pub url: Option<String>,
  #[serde(default)]
  pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
  #[serde(default)]
  pub envelope_id: Option<String>,
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub payload: Option<serde_json::Value>,
  #[serde(default)]
  pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventCallback {
  pub event: SlackEvent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlackEvent {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub user: Option<String>,
  #[serde(default)]
  pub text: Option<String>,
  #[serde(default)]
  pub channel: Option<String>,
  #[serde(default)]
  pub channel_type: Option<String>,
  #[serde(default)]
  pub ts: Option<String>,
  #[serde(default)]
  pub thread_ts: Option<String>,
  #[serde(default)]
  pub bot_id: Option<String>,
  #[serde(default)]
  pub subtype: Option<String>,
}
