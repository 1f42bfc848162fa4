// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use regex::Regex;
use std::collections::HashMap;

const LEADING_MENTION: &str = r"^\s*<@[A-Z0-9]+(?:\|[^>]*)?>[:,]?\s*";

/// A command usage string such as `What is the weather in <location>`
/// compiled into a case-insensitive matcher.
///
/// Every `<name>` placeholder captures one word, except the last one which
/// captures the rest of the message.
#[derive(Debug, Clone)]
pub struct CommandPattern {
  usage: String,
  params: Vec<String>,
  regex: Regex,
  mention: Regex,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandMatch {
  params: HashMap<String, String>,
}

impl CommandMatch {
  pub fn param(&self, name: &str) -> Option<&str> {
    self.params.get(name).map(String::as_str)
  }
}

impl CommandPattern {
  pub fn new(usage: &str) -> Result<Self, Error> {
    let tokens: Vec<&str> = usage.split_whitespace().collect();
    if tokens.is_empty() {
      return Err(Error::ConfigError("Command usage cannot be empty".into()));
    }

    let mut params = Vec::new();
    let mut parts = Vec::with_capacity(tokens.len());
    for (idx, token) in tokens.iter().enumerate() {
      match token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        Some(name) => {
          if !is_param_name(name) {
            return Err(Error::ConfigError(format!(
              "Invalid parameter {token:?} in command {usage:?}"
            )));
          }
          let capture = if idx + 1 == tokens.len() { ".+?" } else { r"\S+" };
          parts.push(format!("(?P<{name}>{capture})"));
          params.push(name.to_string());
        }
        None => parts.push(regex::escape(token)),
      }
    }

    let pattern = format!(r"(?is)^\s*{}\s*[?.!]*\s*$", parts.join(r"\s+"));
    let regex = Regex::new(&pattern)
      .map_err(|e| Error::ConfigError(format!("Invalid command {usage:?}: {e}")))?;
    let mention = Regex::new(LEADING_MENTION)
      .map_err(|e| Error::ConfigError(format!("Invalid mention pattern: {e}")))?;

    Ok(Self {
      usage: tokens.join(" "),
      params,
      regex,
      mention,
    })
  }

  pub fn usage(&self) -> &str {
    &self.usage
  }

  pub fn matches(&self, text: &str) -> Option<CommandMatch> {
    let text = decode_entities(&self.mention.replace(text, ""));
    let captures = self.regex.captures(&text)?;

    let params = self
      .params
      .iter()
      .filter_map(|name| {
        captures
          .name(name)
          .map(|m| (name.clone(), m.as_str().trim().to_string()))
      })
      .collect();

    Some(CommandMatch { params })
  }
}

fn is_param_name(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Slack escapes only these three characters in message text.
fn decode_entities(text: &str) -> String {
  text
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&amp;", "&")
}

/// Escapes text for posting so `<`, `>` and `&` are shown literally.
pub fn escape_text(text: &str) -> String {
  text
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}
