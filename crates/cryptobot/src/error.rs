//! Error types for the bot

use cryptobot_prompt::PromptError;
use cryptobot_utils::EnvError;
use thiserror::Error;

/// Errors surfaced by the dispatcher, the adapters, and startup wiring
#[derive(Debug, Error)]
pub enum BotError {
    /// Template missing or failed to render
    #[error("Template error: {0}")]
    Template(#[from] PromptError),

    /// Sending or editing a message failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Session store could not be read or written
    #[error("Session store error: {0}")]
    Session(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A delegation points at a command with no handler
    #[error("No handler registered for command '{0}'")]
    UnknownHandler(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl From<EnvError> for BotError {
    fn from(err: EnvError) -> Self {
        BotError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_error_becomes_config() {
        let err: BotError = EnvError::Missing("TELEGRAM_TOKEN".to_string()).into();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_template_error_display() {
        let err: BotError = PromptError::TemplateNotRegistered("start".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Template error: Template 'start' not registered"
        );
    }

    #[test]
    fn test_unknown_handler_display() {
        let err = BotError::UnknownHandler("ayuda".to_string());
        assert_eq!(err.to_string(), "No handler registered for command 'ayuda'");
    }
}
