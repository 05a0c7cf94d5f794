//! Conversation data bag
//!
//! The `Context` struct is the free-form key/value state a conversation
//! accumulates across turns. It is stored inside each session and persisted
//! with it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known context keys written by the command handlers
pub mod keys {
    /// Display name of the user that last talked to the bot
    pub const USER: &str = "user";
    /// Language code reported by the messaging platform (e.g., "es", "en")
    pub const LANGUAGE: &str = "language";
    /// Name of the last command handled in the conversation
    pub const LAST_COMMAND: &str = "last_command";
}

/// Key/value state of a conversation
///
/// Values are stored as JSON so that arbitrary handler data survives a round
/// trip through a durable session store. Keys are kept ordered, which keeps
/// persisted sessions stable on disk.
///
/// # Example
///
/// ```
/// use cryptobot_core::Context;
///
/// let ctx = Context::new()
///     .with_language("es")
///     .with_user("@satoshi");
///
/// assert_eq!(ctx.language(), Some("es"));
/// assert_eq!(ctx.user(), Some("@satoshi"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    data: BTreeMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    // =========== Builder Methods ===========

    /// Set the language code
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.set_language(lang);
        self
    }

    /// Set the user display name
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.set_user(user);
        self
    }

    // =========== Common Accessors ===========

    /// Get the language code
    pub fn language(&self) -> Option<&str> {
        self.get(keys::LANGUAGE).and_then(|v| v.as_str())
    }

    /// Set the language code
    pub fn set_language(&mut self, lang: impl Into<String>) {
        self.insert(keys::LANGUAGE, serde_json::json!(lang.into()));
    }

    /// Get the user display name
    pub fn user(&self) -> Option<&str> {
        self.get(keys::USER).and_then(|v| v.as_str())
    }

    /// Set the user display name
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.insert(keys::USER, serde_json::json!(user.into()));
    }

    /// Get the last handled command
    pub fn last_command(&self) -> Option<&str> {
        self.get(keys::LAST_COMMAND).and_then(|v| v.as_str())
    }

    /// Record the last handled command
    pub fn set_last_command(&mut self, command: impl Into<String>) {
        self.insert(keys::LAST_COMMAND, serde_json::json!(command.into()));
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
