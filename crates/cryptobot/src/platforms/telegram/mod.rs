//! Telegram Bot API transport
//!
//! Updates arrive on a webhook served by [`webhook::router`] and replies
//! leave through [`TelegramClient`].

pub mod client;
pub mod types;
pub mod webhook;

pub use client::TelegramClient;
pub use types::{CallbackQuery, Chat, Message, Update, User};
pub use webhook::{WebhookState, router, serve};
