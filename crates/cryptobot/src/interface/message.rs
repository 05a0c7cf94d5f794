//! Inbound update envelope
//!
//! Platform adapters convert their own update format into an [`Inbound`]
//! before handing it to the dispatcher.

use super::MessageRef;
use cryptobot_prompt::Language;
use serde::{Deserialize, Serialize};

/// Prefix of callback data that re-runs a command
pub const CALLBACK_PREFIX: &str = "go:";

/// Callback data that re-runs `command` when its button is pressed
pub fn callback_data(command: &str) -> String {
    format!("{CALLBACK_PREFIX}{command}")
}

/// Command named by callback data, if it carries one
pub fn parse_callback_data(data: &str) -> Option<&str> {
    data.strip_prefix(CALLBACK_PREFIX)
        .map(str::trim)
        .filter(|command| !command.is_empty())
}

/// Split `/name@bot args` into `("name", "args")`
///
/// Returns `None` for text that is not a command.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;

    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default();

    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), args.to_string()))
}

/// The person who sent the update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

impl Sender {
    /// First and last name
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }

    /// `@username`, or the display name when there is none
    pub fn handle(&self) -> String {
        match &self.username {
            Some(username) => format!("@{username}"),
            None => self.display_name(),
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language_code.as_deref().map(Language::from_code)
    }
}

/// The bot message a pressed button belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    pub id: String,
    pub message: MessageRef,
}

/// A command invocation, typed or triggered by a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbound {
    pub command: String,
    pub args: String,
    pub chat_id: i64,
    pub sender: Sender,
    pub callback: Option<Callback>,
}

impl Inbound {
    /// Key of the session this update belongs to
    pub fn conversation_id(&self) -> String {
        format!("{}:{}", self.chat_id, self.sender.id)
    }

    pub fn is_callback(&self) -> bool {
        self.callback.is_some()
    }
}
