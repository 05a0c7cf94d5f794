//! Outbound messaging channel

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message the bot already sent, addressable for edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

/// Text formatting of an outbound message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[default]
    Markdown,
}

/// A button that triggers a callback with `callback_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// Rows of buttons attached under a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineKeyboard {
    #[serde(rename = "inline_keyboard")]
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    /// A keyboard with a single button
    pub fn single(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            rows: vec![vec![InlineButton {
                text: text.into(),
                callback_data: callback_data.into(),
            }]],
        }
    }
}

/// Formatting options of a send or edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboard>,
}

impl SendOptions {
    pub fn markdown() -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Option<InlineKeyboard>) -> Self {
        self.keyboard = keyboard;
        self
    }
}

/// The messaging platform as seen by the dispatcher
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a new message to `chat_id`
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<MessageRef>;

    /// Replace the text of a message sent earlier
    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        options: &SendOptions,
    ) -> Result<()>;

    /// Show the typing indicator
    async fn send_typing(&self, chat_id: i64) -> Result<()>;

    /// Acknowledge a button press so the client stops its spinner
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}
