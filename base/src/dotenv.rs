use crate::Error;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;

pub(in crate::dotenv) static INIT: Once = Once::new();
pub(in crate::dotenv) static DEFAULT_FILENAME: &str = ".env";

#[derive(Debug, Default)]
pub struct Dotenv {
  vars: HashMap<String, String>,
}

impl Dotenv {
  pub fn new() -> Self {
    Self {
      vars: HashMap::new(),
    }
  }

  /// Загружает переменные из файла .env
  ///
  /// # Аргументы
  /// * `filename` - Необязательный путь к файлу .env. Если передано None, используется ".env" по умолчанию.
  ///
  /// # Возвращает
  /// * `Result<(), Error>` - Ok(()) в случае успеха, `Error::EnvFileNotFound`, если файла нет.
  pub fn load_from_file<P: AsRef<Path>>(&mut self, filename: Option<P>) -> Result<(), Error> {
    let path = filename.map_or_else(
      || PathBuf::from(DEFAULT_FILENAME),
      |p| p.as_ref().to_path_buf(),
    );

    if !path.exists() {
      return Err(Error::EnvFileNotFound(path));
    }

    let content = fs::read_to_string(&path)?;
    self.parse_str(&content)
  }

  /// Разбирает содержимое в формате .env: `KEY=value`, `export KEY=value`, комментарии `#`.
  pub fn parse_str(&mut self, content: &str) -> Result<(), Error> {
    for (line_num, line) in content.lines().enumerate() {
      let trimmed = line.trim();

      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }

      let (key, value) = parse_line(trimmed).map_err(|reason| Error::EnvFile {
        line: line_num + 1,
        reason,
      })?;
      self.vars.insert(key, value);
    }

    Ok(())
  }

  /// Переменные, уже заданные в окружении процесса, не перезаписываются.
  pub fn set_env_vars(&self) {
    for (key, value) in &self.vars {
      if env::var_os(key).is_none() {
        env::set_var(key, value);
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&String> {
    self.vars.get(key)
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }
}

fn parse_line(line: &str) -> Result<(String, String), String> {
  let line = line.strip_prefix("export ").unwrap_or(line);
  let (key, value) = line
    .split_once('=')
    .ok_or_else(|| "Invalid format: missing '='".to_string())?;

  let key = key.trim();
  if key.is_empty() {
    return Err("Empty key".to_string());
  }
  if key.contains(char::is_whitespace) {
    return Err(format!("Invalid key: {key:?}"));
  }

  let value = value.trim();
  let value = match value.chars().next() {
    Some(quote @ ('"' | '\'')) => {
      let inner = &value[1..];
      let end = inner
        .find(quote)
        .ok_or_else(|| "Unterminated quoted value".to_string())?;
      inner[..end].to_string()
    }
    _ => match value.find(" #") {
      Some(idx) => value[..idx].trim_end().to_string(),
      None => value.to_string(),
    },
  };

  Ok((key.to_string(), value))
}

/// Загружает `.env` из текущего каталога один раз за время жизни процесса.
pub fn load() -> Result<(), Error> {
  let mut result = Ok(());
  INIT.call_once(|| {
    let mut config = Dotenv::new();
    match config.load_from_file::<&str>(None) {
      Ok(()) => {
        debug!("Loaded {} variables from {}", config.len(), DEFAULT_FILENAME);
        config.set_env_vars();
      }
      Err(err) => {
        result = Err(err);
      }
    }
  });
  result
}
