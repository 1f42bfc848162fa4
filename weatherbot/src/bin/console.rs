// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use tracing::error;
use weather::{failure_reply, WeatherService};

/// Prints the current weather for one city without connecting to Slack.
#[derive(Debug, Parser)]
#[command(name = "weatherbot-console", version, about = "Current weather for a city")]
struct Cli {
  /// City name to look up.
  #[arg(long, default_value = "Paris")]
  city: String,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  weatherbot::load_dotenv()?;
  weatherbot::setup_logging();

  let config = Config::from_env().context("Invalid weather configuration")?;
  let service = WeatherService::from_config(&config)?;

  match service.lookup(&cli.city).await {
    Ok(city) => {
      println!("{city}");
      Ok(())
    }
    Err(e) => {
      error!("Weather lookup failed: {:?}", e);
      eprintln!("{}", failure_reply(&e, cli.city.trim()));
      std::process::exit(1);
    }
  }
}
