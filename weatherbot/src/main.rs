// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use config::{Config, SlackCredentials};
use slack::{SlackClient, SocketModeListener};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use weather::WeatherService;
use weatherbot::{Commands, WeatherBot};

const MESSAGE_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
  weatherbot::load_dotenv()?;
  weatherbot::setup_logging();

  let config = Config::from_env().context("Invalid weather configuration")?;
  let credentials = SlackCredentials::from_env().context("Invalid Slack configuration")?;

  run(config, credentials).await
}

#[instrument(skip(config, credentials))]
async fn run(config: Config, credentials: SlackCredentials) -> Result<()> {
  let weather = WeatherService::from_config(&config)?;
  let bot = Arc::new(WeatherBot::new(weather, Commands::new()?));

  let slack = SlackClient::builder()
    .bot_token(credentials.bot_token)
    .app_token(credentials.app_token)
    .build()?;
  let bot_user_id = slack
    .auth_test()
    .await
    .context("Failed to authenticate with Slack")?;
  info!("Authenticated as {}", bot_user_id);

  let (message_tx, message_rx) = mpsc::channel(MESSAGE_BUFFER);
  let mut listener = SocketModeListener::new(slack.clone(), message_tx).with_bot_user_id(bot_user_id);
  let listener_task = tokio::spawn(async move { listener.run().await });
  let listener_abort = listener_task.abort_handle();

  bot.serve(slack, message_rx, shutdown_signal()).await;
  listener_abort.abort();

  match listener_task.await {
    Ok(result) => result.context("Slack connection failed"),
    Err(e) if e.is_cancelled() => {
      info!("Stopped");
      Ok(())
    }
    Err(e) => Err(e).context("Slack listener panicked"),
  }
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!("Failed to listen for shutdown signal: {}", e);
    std::future::pending::<()>().await;
  }
  info!("Received Ctrl-C");
}
