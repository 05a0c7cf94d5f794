//! Fakes shared by the unit tests

use crate::api::{CurrencyPair, ExchangeError, ExchangeResult, QuoteSource, Ticker};
use crate::clock::FixedClock;
use crate::error::{BotError, Result};
use crate::interface::{Inbound, MessageRef, Messenger, SendOptions, Sender};
use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Always returns the same ticker
pub struct StaticSource {
    name: String,
    ticker: Ticker,
}

impl StaticSource {
    pub fn new(name: &str, ask: f64, bid: f64, volume: f64) -> Self {
        Self {
            name: name.to_string(),
            ticker: Ticker { ask, bid, volume },
        }
    }
}

#[async_trait]
impl QuoteSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _pair: CurrencyPair) -> bool {
        true
    }

    async fn ticker(&self, _pair: CurrencyPair) -> ExchangeResult<Ticker> {
        Ok(self.ticker)
    }
}

/// Always fails with an API error
pub struct FailingSource {
    name: String,
}

impl FailingSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl QuoteSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _pair: CurrencyPair) -> bool {
        true
    }

    async fn ticker(&self, _pair: CurrencyPair) -> ExchangeResult<Ticker> {
        Err(ExchangeError::Api {
            exchange: self.name.clone(),
            message: "service unavailable".to_string(),
        })
    }
}

/// Waits out its timeout, then reports a timeout
pub struct SlowSource {
    name: String,
    timeout: Duration,
}

impl SlowSource {
    pub fn new(name: &str, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl QuoteSource for SlowSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _pair: CurrencyPair) -> bool {
        true
    }

    async fn ticker(&self, _pair: CurrencyPair) -> ExchangeResult<Ticker> {
        tokio::time::sleep(self.timeout).await;
        Err(ExchangeError::Timeout {
            exchange: self.name.clone(),
        })
    }
}

pub fn static_source(name: &str, ask: f64, bid: f64, volume: f64) -> Arc<dyn QuoteSource> {
    Arc::new(StaticSource::new(name, ask, bid, volume))
}

pub fn failing_source(name: &str) -> Arc<dyn QuoteSource> {
    Arc::new(FailingSource::new(name))
}

pub fn slow_source(name: &str, timeout: Duration) -> Arc<dyn QuoteSource> {
    Arc::new(SlowSource::new(name, timeout))
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn stub_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// 2017/06/09 12:00:00 at UTC-3
pub fn fixed_clock() -> FixedClock {
    let offset = FixedOffset::west_opt(3 * 3600).unwrap();
    FixedClock(offset.with_ymd_and_hms(2017, 6, 9, 12, 0, 0).unwrap())
}

/// `/command` typed by Ada (user 42) in chat 1, no language set
pub fn inbound(command: &str) -> Inbound {
    Inbound {
        command: command.to_string(),
        args: String::new(),
        chat_id: 1,
        sender: Sender {
            id: 42,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            username: Some("ada".to_string()),
            language_code: None,
        },
        callback: None,
    }
}

/// Something the bot pushed to the messenger
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent {
        chat_id: i64,
        text: String,
        options: SendOptions,
    },
    Edited {
        target: MessageRef,
        text: String,
        options: SendOptions,
    },
    Typing {
        chat_id: i64,
    },
    Answered {
        id: String,
    },
}

/// Messenger that records every call
#[derive(Default)]
pub struct RecordingMessenger {
    deliveries: Mutex<Vec<Delivery>>,
    next_id: AtomicI64,
    fail_sends: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later send and edit fail
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Sent { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, delivery: Delivery) {
        self.deliveries.lock().unwrap().push(delivery);
    }

    fn check(&self) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            Err(BotError::Transport("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<MessageRef> {
        self.check()?;
        self.record(Delivery::Sent {
            chat_id,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(MessageRef {
            chat_id,
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        })
    }

    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        options: &SendOptions,
    ) -> Result<()> {
        self.check()?;
        self.record(Delivery::Edited {
            target,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.record(Delivery::Typing { chat_id });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.record(Delivery::Answered {
            id: callback_id.to_string(),
        });
        Ok(())
    }
}
