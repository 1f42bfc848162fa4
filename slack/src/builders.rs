// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::SlackClient,
  config::{SlackConfig, MAX_MESSAGE_LENGTH},
  types::PostMessage,
};
use error::Error;

#[derive(Default)]
pub struct MessageBuilder<'a> {
  pub(crate) channel: Option<&'a str>,
  pub(crate) text: Option<&'a str>,
  pub(crate) thread_ts: Option<&'a str>,
  pub(crate) unfurl_links: Option<bool>,
  pub(crate) mrkdwn: Option<bool>,
}

impl<'a> MessageBuilder<'a> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn channel(mut self, channel: &'a str) -> Self {
    self.channel = Some(channel);
    self
  }

  pub fn text(mut self, text: &'a str) -> Self {
    self.text = Some(text);
    self
  }

  /// Replies inside the thread started by `ts`.
  pub fn thread_ts(mut self, ts: &'a str) -> Self {
    self.thread_ts = Some(ts);
    self
  }

  pub fn disable_unfurl(mut self) -> Self {
    self.unfurl_links = Some(false);
    self
  }

  pub fn plain_text(mut self) -> Self {
    self.mrkdwn = Some(false);
    self
  }

  pub async fn send(self, client: &SlackClient) -> Result<(), Error> {
    let channel = self
      .channel
      .ok_or_else(|| Error::ApiError("Channel is required".into()))?;

    let text = self
      .text
      .ok_or_else(|| Error::ApiError("Message text is required".into()))?;

    if text.chars().count() > MAX_MESSAGE_LENGTH {
      return Err(Error::ApiError(format!(
        "Message too long: {} characters (max {})",
        text.chars().count(),
        MAX_MESSAGE_LENGTH
      )));
    }

    let message = PostMessage {
      channel,
      text,
      thread_ts: self.thread_ts,
      unfurl_links: self.unfurl_links,
      mrkdwn: self.mrkdwn,
    };

    client.post_message(message).await
  }
}

#[derive(Default)]
pub struct SlackClientBuilder {
  pub(crate) config: SlackConfig,
}

impl SlackClientBuilder {
  pub fn bot_token(mut self, token: impl Into<String>) -> Self {
    self.config.bot_token = token.into();
    self
  }

  pub fn app_token(mut self, token: impl Into<String>) -> Self {
    self.config.app_token = token.into();
    self
  }

  pub fn api_base(mut self, base: impl Into<String>) -> Self {
    let mut base = base.into();
    if !base.ends_with('/') {
      base.push('/');
    }
    self.config.api_base = base;
    self
  }

  pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
    self.config.timeout = timeout;
    self
  }

  pub fn retry_attempts(mut self, attempts: u32) -> Self {
    self.config.retry_attempts = attempts;
    self
  }

  pub fn retry_delay(mut self, delay: std::time::Duration) -> Self {
    self.config.retry_delay = delay;
    self
  }

  pub fn build(self) -> Result<SlackClient, Error> {
    if self.config.bot_token.is_empty() {
      return Err(Error::ConfigError("Bot token cannot be empty".into()));
    }

    let client = reqwest::Client::builder()
      .timeout(self.config.timeout)
      .build()
      .map_err(Error::HttpError)?;

    Ok(SlackClient {
      config: self.config,
      client,
    })
  }
}
