//! Telegram bot relaying cryptocurrency quotes from Chilean exchanges
//!
//! The bot answers `/btc` and `/eth` with the current ask, bid and volume of
//! every exchange that lists the pair in Chilean pesos, plus a button that
//! refreshes the quote in place. It also answers `/start`, `/help` and
//! `/about`.
//!
//! # Architecture
//!
//! - [`api`]: exchange clients behind the [`api::QuoteSource`] trait
//! - [`market`]: concurrent aggregation of every source for a pair
//! - [`prompts`]: bilingual message templates
//! - [`bot`]: command matching, delegation, handlers and the turn loop
//! - [`interface`]: the inbound envelope, outbound messenger and sessions
//! - [`platforms`]: the Telegram webhook and Bot API client
//!
//! # Example
//!
//! ```rust,ignore
//! use cryptobot::bot::{BotServices, build_dispatcher};
//! use cryptobot::platforms::telegram::{WebhookState, serve};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = Arc::new(build_dispatcher(services)?);
//!     serve("0.0.0.0:3000", WebhookState::new(&token, dispatcher)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod clock;
pub mod config;
pub mod error;
pub mod interface;
pub mod market;
pub mod money;
pub mod platforms;
pub mod prompts;

#[cfg(test)]
mod testing;

pub use api::{CurrencyPair, ExchangeError, QuoteSource, Ticker};
pub use bot::{BotServices, Dispatcher, build_dispatcher};
pub use config::BotConfig;
pub use error::{BotError, Result};
pub use market::{Aggregator, MarketBook, QuoteRow};

pub use cryptobot_prompt::Language;
