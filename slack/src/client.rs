// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  builders::{MessageBuilder, SlackClientBuilder},
  config::SlackConfig,
  types::{AuthTestResponse, ConnectionsOpenResponse, PostMessage, SlackResponse},
};
use error::Error;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument, warn};

#[derive(Clone)]
pub struct SlackClient {
  pub(crate) config: SlackConfig,
  pub(crate) client: Client,
}

impl SlackClient {
  pub fn builder() -> SlackClientBuilder {
    SlackClientBuilder::default()
  }

  pub fn message<'a>(&self) -> MessageBuilder<'a> {
    MessageBuilder::new()
  }

  fn endpoint(&self, method: &str) -> String {
    format!("{}{}", self.config.api_base, method)
  }

  #[instrument(skip(self, message), fields(channel = message.channel))]
  pub(crate) async fn post_message(&self, message: PostMessage<'_>) -> Result<(), Error> {
    let url = self.endpoint("chat.postMessage");

    for attempt in 0..=self.config.retry_attempts {
      match self.try_post_message(&url, &message).await {
        Ok(_) => {
          debug!("Message sent successfully");
          return Ok(());
        }
        Err(e) if !is_retryable(&e) => {
          error!("Failed to send message: {}", e);
          return Err(e);
        }
        Err(e) => {
          if attempt == self.config.retry_attempts {
            error!("All retry attempts failed");
            return Err(e);
          }
          warn!("Attempt {} failed: {}. Retrying...", attempt + 1, e);
          tokio::time::sleep(self.config.retry_delay).await;
        }
      }
    }

    Err(Error::ApiError("Max retry attempts reached".into()))
  }

  async fn try_post_message(&self, url: &str, message: &PostMessage<'_>) -> Result<(), Error> {
    let response = self
      .client
      .post(url)
      .bearer_auth(&self.config.bot_token)
      .json(message)
      .send()
      .await
      .map_err(Error::HttpError)?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
      return Err(Error::RateLimitExceeded);
    }
    if status.is_server_error() {
      return Err(Error::UpstreamStatus {
        api: "slack",
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
      });
    }

    let slack_response: SlackResponse = response.json().await.map_err(Error::HttpError)?;

    if !slack_response.ok {
      return Err(Error::ApiError(slack_response.error));
    }

    Ok(())
  }

  /// Returns the bot's own user id.
  #[instrument(skip(self))]
  pub async fn auth_test(&self) -> Result<String, Error> {
    let response = self
      .client
      .post(self.endpoint("auth.test"))
      .bearer_auth(&self.config.bot_token)
      .send()
      .await
      .map_err(Error::HttpError)?;

    let auth: AuthTestResponse = response.json().await.map_err(Error::HttpError)?;

    match (auth.ok, auth.user_id) {
      (true, Some(user_id)) => Ok(user_id),
      (true, None) => Err(Error::ApiError("auth.test returned no user_id".into())),
      (false, _) => Err(Error::ApiError(auth.error)),
    }
  }

  /// Asks Slack for a fresh Socket Mode WebSocket URL.
  #[instrument(skip(self))]
  pub async fn open_connection(&self) -> Result<String, Error> {
    if self.config.app_token.is_empty() {
      return Err(Error::ConfigError(
        "App token is required for Socket Mode".into(),
      ));
    }

    let response = self
      .client
      .post(self.endpoint("apps.connections.open"))
      .bearer_auth(&self.config.app_token)
      .send()
      .await
      .map_err(Error::HttpError)?;

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
      return Err(Error::RateLimitExceeded);
    }

    let open: ConnectionsOpenResponse = response.json().await.map_err(Error::HttpError)?;

    match (open.ok, open.url) {
      (true, Some(url)) => Ok(url),
      (true, None) => Err(Error::ApiError(
        "apps.connections.open returned no url".into(),
      )),
      (false, _) => Err(Error::ApiError(open.error)),
    }
  }
}

// Only failures where Slack cannot have accepted the post.
fn is_retryable(err: &Error) -> bool {
  match err {
    Error::RateLimitExceeded => true,
    Error::UpstreamStatus { status, .. } => *status >= 500,
    Error::HttpError(e) => e.is_connect(),
    _ => false,
  }
}
