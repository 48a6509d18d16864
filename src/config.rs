use crate::types::error::EventBotError;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Env file the bot reads before the process environment is consulted.
const DOTENV_PATH: &str = "data/.env";

/// Configuration for event-bot loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub events_path: PathBuf,
    pub command_prefix: char,
    pub prompt_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_inner(true)
    }

    #[cfg(test)]
    pub fn from_env_no_dotenv() -> Result<Self> {
        Self::from_env_inner(false)
    }

    fn from_env_inner(load_dotenv: bool) -> Result<Self> {
        if load_dotenv {
            dotenvy::from_path(DOTENV_PATH).ok();
            dotenvy::dotenv().ok();
        }

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                EventBotError::config_error(format!(
                    "TELEGRAM_BOT_TOKEN is required but not set (checked {} and the environment)",
                    DOTENV_PATH
                ))
            })?;

        let events_path = std::env::var("EVENTS_PATH")
            .unwrap_or_else(|_| "./data/events.json".to_string());
        let events_path = PathBuf::from(shellexpand::tilde(&events_path).into_owned());

        let command_prefix = parse_prefix(
            &std::env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
        )?;

        let prompt_timeout = Duration::from_millis(
            std::env::var("PROMPT_TIMEOUT_MS")
                .unwrap_or_else(|_| "60000".to_string())
                .parse::<u64>()
                .map_err(|_| anyhow!("PROMPT_TIMEOUT_MS must be a valid integer"))?,
        );

        debug!(
            events_path = %events_path.display(),
            command_prefix = %command_prefix,
            prompt_timeout_ms = prompt_timeout.as_millis() as u64,
            "Config resolved from environment"
        );

        Ok(Config {
            telegram_bot_token,
            events_path,
            command_prefix,
            prompt_timeout,
        })
    }
}

fn parse_prefix(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(prefix), None) if !prefix.is_whitespace() => Ok(prefix),
        _ => Err(anyhow!(
            "COMMAND_PREFIX must be a single non-whitespace character"
        )),
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config {{\n  telegram_bot_token: ***MASKED***,\n  events_path: {:?},\n  command_prefix: {:?},\n  prompt_timeout: {:?},\n}}",
            self.events_path, self.command_prefix, self.prompt_timeout,
        )
    }
}

#[cfg(test)]
pub fn test_config(events_path: impl Into<PathBuf>) -> Config {
    Config {
        telegram_bot_token: "test_token".to_string(),
        events_path: events_path.into(),
        command_prefix: '!',
        prompt_timeout: Duration::from_secs(60),
    }
}
