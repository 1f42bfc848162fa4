// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod bot;
pub mod commands;

use anyhow::{Context, Result};
use error::Error;

pub use bot::WeatherBot;
pub use commands::{Command, Commands};

/// Loads `.env` when present. Variables already set in the environment win.
pub fn load_dotenv() -> Result<()> {
  match base::dotenv::load() {
    Ok(()) | Err(Error::EnvFileNotFound(_)) => Ok(()),
    Err(e) => Err(e).context("Failed to load .env file"),
  }
}

#[cfg(debug_assertions)]
pub fn setup_logging() {
  tracing_subscriber::fmt()
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
pub fn setup_logging() {
  tracing_subscriber::fmt().init();
}
