//! Messaging platform adapters

pub mod telegram;

pub use telegram::{TelegramClient, WebhookState};
