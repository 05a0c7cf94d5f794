//! What a handler asks the dispatcher to send

use crate::error::Result;
use crate::interface::{InlineKeyboard, MessageRef, ParseMode, SendOptions};
use crate::prompts::TemplateName;
use serde::Serialize;

/// A reply requested by a handler, not yet rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub template: TemplateName,
    pub context: serde_json::Value,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    /// Reply rendering `template` with a typed context
    pub fn new<C: Serialize>(template: TemplateName, context: &C) -> Result<Self> {
        Ok(Self {
            template,
            context: serde_json::to_value(context)?,
            keyboard: None,
        })
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Whether a reply is a new message or an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    Send,
    Update(MessageRef),
}

/// A rendered reply and how it will be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyIntent {
    pub mode: ReplyMode,
    pub template: TemplateName,
    pub text: String,
    pub parse_mode: ParseMode,
    pub keyboard: Option<InlineKeyboard>,
}

impl ReplyIntent {
    pub fn options(&self) -> SendOptions {
        SendOptions {
            parse_mode: Some(self.parse_mode),
            keyboard: self.keyboard.clone(),
        }
    }
}
