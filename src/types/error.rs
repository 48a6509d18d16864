use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EventBotError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Storage error: {path}, reason: {reason}")]
    StorageError { path: String, reason: String },

    #[error("Timed out after {}s waiting for a reply", .timeout.as_secs())]
    PromptTimeout { timeout: Duration },

    #[error("Prompt cancelled: {reason}")]
    PromptCancelled { reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Index out of range: {index} (event count: {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("Chat API error: {message}")]
    ChatError { message: String },
}

impl EventBotError {
    /// Returns true if this error was caused by user input/action rather than a
    /// system failure. Command dispatch logs these at WARN instead of ERROR.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::PromptTimeout { .. }
                | Self::PromptCancelled { .. }
                | Self::ValidationError { .. }
                | Self::OutOfRange { .. }
        )
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn storage_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn prompt_timeout(timeout: Duration) -> Self {
        Self::PromptTimeout { timeout }
    }

    pub fn prompt_cancelled(reason: impl Into<String>) -> Self {
        Self::PromptCancelled {
            reason: reason.into(),
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::OutOfRange { index, count }
    }

    pub fn chat_error(message: impl Into<String>) -> Self {
        Self::ChatError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EventBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = EventBotError::config_error("TELEGRAM_BOT_TOKEN is required but not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: TELEGRAM_BOT_TOKEN is required but not set"
        );
    }

    #[test]
    fn test_storage_error() {
        let err = EventBotError::storage_error("data/events.json", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Storage error: data/events.json, reason: No such file or directory"
        );
    }

    #[test]
    fn test_prompt_timeout_error() {
        let err = EventBotError::prompt_timeout(Duration::from_secs(60));
        assert_eq!(err.to_string(), "Timed out after 60s waiting for a reply");
    }

    #[test]
    fn test_prompt_cancelled_error() {
        let err = EventBotError::prompt_cancelled("superseded by a newer prompt");
        assert_eq!(
            err.to_string(),
            "Prompt cancelled: superseded by a newer prompt"
        );
    }

    #[test]
    fn test_out_of_range_error() {
        let err = EventBotError::out_of_range(5, 3);
        assert_eq!(err.to_string(), "Index out of range: 5 (event count: 3)");
    }

    #[test]
    fn test_chat_error() {
        let err = EventBotError::chat_error("Bot token invalid");
        assert_eq!(err.to_string(), "Chat API error: Bot token invalid");
    }

    #[test]
    fn test_is_user_error_classification() {
        assert!(EventBotError::prompt_timeout(Duration::from_secs(1)).is_user_error());
        assert!(EventBotError::prompt_cancelled("test").is_user_error());
        assert!(EventBotError::validation_error("test").is_user_error());
        assert!(EventBotError::out_of_range(1, 0).is_user_error());

        assert!(!EventBotError::storage_error("p", "test").is_user_error());
        assert!(!EventBotError::chat_error("test").is_user_error());
        assert!(!EventBotError::config_error("test").is_user_error());
    }

    #[test]
    fn test_error_clone() {
        let err = EventBotError::out_of_range(2, 1);
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
