// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::commands::{Command, Commands};
use error::Error;
use slack::{ChatMessage, SlackClient};
use std::{future::Future, sync::Arc};
use tokio::{sync::mpsc, task::JoinSet};
use tracing::{debug, error, info, instrument};
use weather::WeatherService;

pub struct WeatherBot {
  weather: WeatherService,
  commands: Commands,
}

impl WeatherBot {
  pub fn new(weather: WeatherService, commands: Commands) -> Self {
    Self { weather, commands }
  }

  /// The reply for a message, or `None` when it is not a command.
  pub async fn respond(&self, text: &str) -> Option<String> {
    match self.commands.parse(text)? {
      Command::Weather { location } => Some(self.weather.reply(&location).await),
      Command::Help => Some(self.commands.help_text()),
    }
  }

  #[instrument(skip(self, slack, message), fields(channel = %message.channel, user = %message.user))]
  async fn handle(&self, slack: &SlackClient, message: ChatMessage) -> Result<(), Error> {
    let Some(reply) = self.respond(&message.text).await else {
      debug!("Ignoring message that matches no command");
      return Ok(());
    };

    let text = slack::escape_text(&reply);
    let mut builder = slack
      .message()
      .channel(&message.channel)
      .text(&text)
      .disable_unfurl();
    if let Some(thread_ts) = message.thread_ts.as_deref() {
      builder = builder.thread_ts(thread_ts);
    }
    builder.send(slack).await?;

    info!("Replied to command");
    Ok(())
  }

  /// Handles each incoming message on its own task until `shutdown` resolves
  /// or the message channel closes. In-flight tasks are aborted on shutdown.
  pub async fn serve<S>(
    self: Arc<Self>,
    slack: SlackClient,
    mut messages: mpsc::Receiver<ChatMessage>,
    shutdown: S,
  ) where
    S: Future<Output = ()>,
  {
    let mut tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
      tokio::select! {
        _ = &mut shutdown => {
          info!("Shutting down, aborting {} in-flight requests", tasks.len());
          tasks.shutdown().await;
          return;
        }
        Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
          if let Err(e) = joined {
            error!("Command task failed: {}", e);
          }
        }
        message = messages.recv() => match message {
          Some(message) => {
            let bot = Arc::clone(&self);
            let slack = slack.clone();
            tasks.spawn(async move {
              if let Err(e) = bot.handle(&slack, message).await {
                error!("Failed to send reply: {}", e);
              }
            });
          }
          None => {
            info!("Message stream closed, waiting for {} in-flight requests", tasks.len());
            while tasks.join_next().await.is_some() {}
            return;
          }
        },
      }
    }
  }
}
