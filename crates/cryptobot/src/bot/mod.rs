//! Crypto quote bot
//!
//! This module wires commands to handlers and delivers their replies.
//!
//! # Features
//!
//! - **Exact and pattern commands**: `/start` matches exactly, `/btc` and `/eth` by
//!   case-insensitive pattern
//! - **Delegation**: `/help` runs the `/start` handler
//! - **Refreshable quotes**: quote replies carry a button that edits them in place
//! - **Sessions**: per-conversation state is persisted after every turn
//!
//! # Example
//!
//! ```rust,ignore
//! use cryptobot::bot::{BotServices, build_dispatcher};
//!
//! let dispatcher = build_dispatcher(services)?;
//! dispatcher.process(&inbound).await;
//! ```

pub mod commands;
pub mod dispatcher;
pub mod handlers;
pub mod hooks;
pub mod reply;

pub use commands::{CommandMatcher, parse_command_list};
pub use dispatcher::{Dispatcher, DispatcherBuilder, TurnOutcome};
pub use handlers::{AboutHandler, CommandHandler, LAST_PAIR, MarketHandler, StartHandler, Turn};
pub use hooks::{BeforeHook, LoggingHook};
pub use reply::{Reply, ReplyIntent, ReplyMode};

use crate::clock::Clock;
use crate::config::{BotInfo, Donation};
use crate::error::Result;
use crate::interface::{Messenger, SessionStore};
use crate::market::{Aggregator, MarketBook};
use cryptobot_prompt::TemplateRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Command list shipped with the bot
pub const BUNDLED_COMMANDS: &str = include_str!("../../docs/commands.txt");

/// Load the command list shown by `/start`
///
/// Reads `path` when given, the bundled list otherwise.
pub async fn load_commands(path: Option<&Path>) -> Result<Vec<String>> {
    let commands = match path {
        Some(path) => parse_command_list(&tokio::fs::read_to_string(path).await?),
        None => parse_command_list(BUNDLED_COMMANDS),
    };
    info!(count = commands.len(), "Loaded command list");
    Ok(commands)
}

/// Collaborators the dispatcher is built from
pub struct BotServices {
    pub templates: Arc<TemplateRegistry>,
    pub sessions: Arc<dyn SessionStore>,
    pub messenger: Arc<dyn Messenger>,
    pub clock: Arc<dyn Clock>,
    pub book: MarketBook,
    pub commands: Vec<String>,
    pub info: BotInfo,
    pub donations: Vec<Donation>,
}

/// Build the dispatcher with the standard command set
///
/// `start` and `about` match exactly, `help` delegates to `start`, and every
/// pair in the book gets a case-insensitive quote command named after its
/// base currency.
pub fn build_dispatcher(services: BotServices) -> Result<Dispatcher> {
    let aggregator = Arc::new(Aggregator::new(services.book.clone()));

    let mut builder = Dispatcher::builder()
        .templates(services.templates)
        .sessions(services.sessions)
        .messenger(services.messenger.clone())
        .hook(Arc::new(LoggingHook::new(services.clock.clone())))
        .command(
            CommandMatcher::exact("start"),
            Arc::new(StartHandler::new(services.commands)),
        )
        .command(
            CommandMatcher::exact("about"),
            Arc::new(AboutHandler::new(services.info, services.donations)),
        )
        .delegate("help", "start");

    for pair in services.book.pairs() {
        builder = builder.command(
            CommandMatcher::case_insensitive(&pair.command())?,
            Arc::new(MarketHandler::new(
                pair,
                aggregator.clone(),
                services.clock.clone(),
                services.messenger.clone(),
            )),
        );
    }

    builder.build()
}
