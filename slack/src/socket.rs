// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::SlackClient,
  types::{ChatMessage, Envelope, EventCallback, SlackEvent},
};
use error::Error;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, instrument, warn};

const MAX_RECONNECT_ATTEMPTS: u32 = 10;
const INITIAL_RECONNECT_DELAY: Duration = Duration::from_secs(1);

enum StreamEnd {
  Reconnect,
  Shutdown,
}

enum Action {
  Continue,
  Reconnect,
  Dispatch(ChatMessage),
}

/// Receives events over Slack Socket Mode and forwards messages addressed to
/// the bot. Every envelope is acknowledged before it is handled.
pub struct SocketModeListener {
  client: SlackClient,
  bot_user_id: Option<String>,
  message_tx: mpsc::Sender<ChatMessage>,
  connected: bool,
  reconnect_attempts: u32,
  reconnect_delay: Duration,
}

impl SocketModeListener {
  pub fn new(client: SlackClient, message_tx: mpsc::Sender<ChatMessage>) -> Self {
    Self {
      client,
      bot_user_id: None,
      message_tx,
      connected: false,
      reconnect_attempts: 0,
      reconnect_delay: INITIAL_RECONNECT_DELAY,
    }
  }

  /// Messages from this user are ignored.
  pub fn with_bot_user_id(mut self, user_id: impl Into<String>) -> Self {
    self.bot_user_id = Some(user_id.into());
    self
  }

  /// Base delay of the reconnect backoff, doubled on each consecutive failure.
  pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
    self.reconnect_delay = delay;
    self
  }

  /// Runs until the receiving side is dropped. A failure to establish the
  /// first connection is returned immediately. Every later drop, close or
  /// `disconnect` reconnects with exponential backoff; the attempt counter is
  /// reset once Slack says `hello` on a fresh connection.
  #[instrument(skip(self))]
  pub async fn run(&mut self) -> Result<(), Error> {
    loop {
      match self.connect_and_stream().await {
        Ok(StreamEnd::Shutdown) => {
          info!("Message receiver closed, stopping Socket Mode listener");
          return Ok(());
        }
        Ok(StreamEnd::Reconnect) => {
          info!("Socket Mode connection ended");
        }
        Err(e) if !self.connected => {
          error!("Initial Socket Mode connection failed: {}", e);
          return Err(Error::ConnectionFailed(e.to_string()));
        }
        Err(e) => {
          error!("Socket Mode error: {}", e);
        }
      }

      self.reconnect_attempts += 1;
      if self.reconnect_attempts >= MAX_RECONNECT_ATTEMPTS {
        return Err(Error::MaxReconnectAttempts);
      }

      let delay = self.reconnect_delay * 2u32.pow(self.reconnect_attempts - 1);
      warn!(
        "Reconnecting in {:?} (attempt {}/{})",
        delay, self.reconnect_attempts, MAX_RECONNECT_ATTEMPTS
      );
      tokio::time::sleep(delay).await;
    }
  }

  async fn connect_and_stream(&mut self) -> Result<StreamEnd, Error> {
    let url = self.client.open_connection().await?;
    let (ws_stream, _) = connect_async(url.as_str()).await?;
    let (mut write, mut read) = ws_stream.split();

    self.connected = true;
    info!("Socket Mode connection established");

    while let Some(msg) = read.next().await {
      match msg {
        Ok(Message::Text(text)) => {
          let envelope: Envelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
              debug!("Ignoring unparseable frame: {}", e);
              continue;
            }
          };

          if envelope.kind == "hello" {
            self.reconnect_attempts = 0;
          }

          if let Some(envelope_id) = envelope.envelope_id.as_deref() {
            let ack = serde_json::json!({ "envelope_id": envelope_id }).to_string();
            write.send(Message::Text(ack.into())).await?;
          }

          match self.handle_envelope(envelope) {
            Action::Continue => {}
            Action::Reconnect => return Ok(StreamEnd::Reconnect),
            Action::Dispatch(message) => {
              if self.message_tx.send(message).await.is_err() {
                return Ok(StreamEnd::Shutdown);
              }
            }
          }
        }
        Ok(Message::Close(frame)) => {
          info!("Received close frame: {:?}", frame);
          return Ok(StreamEnd::Reconnect);
        }
        Ok(_) => {}
        Err(e) => return Err(e.into()),
      }
    }

    Ok(StreamEnd::Reconnect)
  }

  fn handle_envelope(&self, envelope: Envelope) -> Action {
    match envelope.kind.as_str() {
      "hello" => {
        debug!("Socket Mode hello received");
        Action::Continue
      }
      "disconnect" => {
        info!("Slack requested disconnect: {:?}", envelope.reason);
        Action::Reconnect
      }
      "events_api" => {
        let Some(payload) = envelope.payload else {
          return Action::Continue;
        };
        match serde_json::from_value::<EventCallback>(payload) {
          Ok(callback) => chat_message(callback.event, self.bot_user_id.as_deref())
            .map_or(Action::Continue, Action::Dispatch),
          Err(e) => {
            debug!("Ignoring unsupported event payload: {}", e);
            Action::Continue
          }
        }
      }
      other => {
        debug!("Ignoring {} envelope", other);
        Action::Continue
      }
    }
  }
}

/// Keeps mentions anywhere and plain messages in DMs; drops bot traffic,
/// edits and other subtypes.
fn chat_message(event: SlackEvent, bot_user_id: Option<&str>) -> Option<ChatMessage> {
  let addressed = match event.kind.as_str() {
    "app_mention" => true,
    "message" => event.channel_type.as_deref() == Some("im"),
    _ => false,
  };
  if !addressed || event.bot_id.is_some() || event.subtype.is_some() {
    return None;
  }

  let user = event.user?;
  if bot_user_id == Some(user.as_str()) {
    return None;
  }

  Some(ChatMessage {
    channel: event.channel?,
    user,
    text: event.text?,
    ts: event.ts?,
    thread_ts: event.thread_ts,
  })
}
