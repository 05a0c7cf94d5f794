//! Platform-agnostic bot interfaces
//!
//! The dispatcher only sees these types. Platform adapters translate their
//! own wire formats into [`Inbound`] and implement [`Messenger`].

pub mod file_store;
pub mod message;
pub mod messenger;
pub mod session;

pub use file_store::FileSessionStore;
pub use message::{
    CALLBACK_PREFIX, Callback, Inbound, Sender, callback_data, parse_callback_data, parse_command,
};
#[cfg(test)]
pub use messenger::MockMessenger;
pub use messenger::{InlineButton, InlineKeyboard, MessageRef, Messenger, ParseMode, SendOptions};
pub use session::{InMemorySessionStore, Session, SessionStore};
