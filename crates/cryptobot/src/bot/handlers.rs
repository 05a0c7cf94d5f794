//! Command handlers

use super::Reply;
use crate::api::CurrencyPair;
use crate::clock::Clock;
use crate::config::{BotInfo, Donation};
use crate::error::Result;
use crate::interface::{Inbound, InlineKeyboard, Messenger, Session, callback_data};
use crate::market::Aggregator;
use crate::prompts::{
    AboutInfoContext, DonationsContext, MarketStatusContext, StartContext, TemplateName,
    refresh_label,
};
use async_trait::async_trait;
use cryptobot_prompt::Language;
use std::sync::Arc;
use tracing::warn;

/// Session key holding the label of the last quoted pair
pub const LAST_PAIR: &str = "last_pair";

/// Everything a handler sees of the current update
pub struct Turn<'a> {
    pub inbound: &'a Inbound,
    pub session: &'a mut Session,
    pub language: Language,
}

/// Logic behind one or more command names
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Produce the replies for this turn, in delivery order
    async fn handle(&self, turn: &mut Turn<'_>) -> Result<Vec<Reply>>;
}

/// `/start`: greeting plus the list of commands
#[derive(Debug, Clone)]
pub struct StartHandler {
    commands: Arc<[String]>,
}

impl StartHandler {
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands: commands.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    async fn handle(&self, turn: &mut Turn<'_>) -> Result<Vec<Reply>> {
        turn.session.data.set_user(turn.inbound.sender.handle());

        let context = StartContext {
            user: Some(turn.inbound.sender.display_name()),
            commands: self.commands.to_vec(),
        };
        Ok(vec![Reply::new(TemplateName::Start, &context)?])
    }
}

/// `/about`: author details, then donation addresses when any are set
#[derive(Debug, Clone)]
pub struct AboutHandler {
    info: BotInfo,
    donations: Vec<Donation>,
}

impl AboutHandler {
    pub fn new(info: BotInfo, donations: Vec<Donation>) -> Self {
        Self { info, donations }
    }
}

#[async_trait]
impl CommandHandler for AboutHandler {
    async fn handle(&self, _turn: &mut Turn<'_>) -> Result<Vec<Reply>> {
        let mut replies = vec![Reply::new(
            TemplateName::AboutInfo,
            &AboutInfoContext {
                info: self.info.clone(),
            },
        )?];

        if !self.donations.is_empty() {
            replies.push(Reply::new(
                TemplateName::AboutDonations,
                &DonationsContext {
                    donations: self.donations.clone(),
                },
            )?);
        }
        Ok(replies)
    }
}

/// Quote commands such as `/btc`: one row per exchange plus a refresh button
pub struct MarketHandler {
    pair: CurrencyPair,
    aggregator: Arc<Aggregator>,
    clock: Arc<dyn Clock>,
    messenger: Arc<dyn Messenger>,
}

impl MarketHandler {
    pub fn new(
        pair: CurrencyPair,
        aggregator: Arc<Aggregator>,
        clock: Arc<dyn Clock>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            pair,
            aggregator,
            clock,
            messenger,
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }
}

#[async_trait]
impl CommandHandler for MarketHandler {
    async fn handle(&self, turn: &mut Turn<'_>) -> Result<Vec<Reply>> {
        if let Err(e) = self.messenger.send_typing(turn.inbound.chat_id).await {
            warn!(chat = turn.inbound.chat_id, error = %e, "Failed to send typing indicator");
        }

        let rows = self.aggregator.quotes(self.pair).await;
        turn.session
            .data
            .insert(LAST_PAIR, serde_json::Value::from(self.pair.label()));
        let context = MarketStatusContext::new(&rows, self.clock.stamp());
        let keyboard = InlineKeyboard::single(
            refresh_label(&turn.language),
            callback_data(&self.pair.command()),
        );

        Ok(vec![
            Reply::new(TemplateName::MarketStatus, &context)?.with_keyboard(keyboard),
        ])
    }
}
