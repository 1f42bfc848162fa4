// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use slack::CommandPattern;

pub const WEATHER_COMMAND: &str = "What is the weather in <location>";
const HELP_COMMAND: &str = "help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Weather { location: String },
  Help,
}

#[derive(Debug, Clone)]
struct CommandDefinition {
  pattern: CommandPattern,
  description: &'static str,
  example: &'static str,
}

#[derive(Debug, Clone)]
pub struct Commands {
  weather: CommandDefinition,
  help: CommandDefinition,
}

impl Commands {
  pub fn new() -> Result<Self, Error> {
    Ok(Self {
      weather: CommandDefinition {
        pattern: CommandPattern::new(WEATHER_COMMAND)?,
        description: "Current weather in the city.",
        example: "What is the weather in Paris",
      },
      help: CommandDefinition {
        pattern: CommandPattern::new(HELP_COMMAND)?,
        description: "Lists the available commands.",
        example: "help",
      },
    })
  }

  pub fn parse(&self, text: &str) -> Option<Command> {
    if let Some(m) = self.weather.pattern.matches(text) {
      let location = m.param("location")?.to_string();
      return Some(Command::Weather { location });
    }
    self.help.pattern.matches(text).map(|_| Command::Help)
  }

  pub fn help_text(&self) -> String {
    [&self.weather, &self.help]
      .iter()
      .map(|def| {
        format!(
          "*{}* - {}\n> Example: _{}_",
          def.pattern.usage(),
          def.description,
          def.example
        )
      })
      .collect::<Vec<_>>()
      .join("\n")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_weather_command() {
    let commands = Commands::new().unwrap();
    assert_eq!(
      commands.parse("<@U0BOT> What is the weather in Buenos Aires?"),
      Some(Command::Weather {
        location: "Buenos Aires".into()
      })
    );
  }

  #[test]
  fn parses_help() {
    let commands = Commands::new().unwrap();
    assert_eq!(commands.parse(" Help "), Some(Command::Help));
  }

  #[test]
  fn ignores_unrelated_text() {
    let commands = Commands::new().unwrap();
    assert_eq!(commands.parse("good morning"), None);
    assert_eq!(commands.parse("help me with the weather in Paris"), None);
  }

  #[test]
  fn help_lists_usage_and_example() {
    let help = Commands::new().unwrap().help_text();
    assert!(help.contains("*What is the weather in <location>* - Current weather in the city."));
    assert!(help.contains("> Example: _What is the weather in Paris_"));
    assert!(help.contains("*help*"));
  }
}
