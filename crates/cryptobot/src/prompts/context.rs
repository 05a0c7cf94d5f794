//! Typed render contexts, one per template

use crate::config::{BotInfo, Donation};
use crate::market::{ERROR_SENTINEL, QuoteRow};
use crate::money;
use serde::Serialize;

/// Context of the `start` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartContext {
    pub user: Option<String>,
    pub commands: Vec<String>,
}

/// Context of the `about.info` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutInfoContext {
    pub info: BotInfo,
}

/// Context of the `about.donations` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationsContext {
    pub donations: Vec<Donation>,
}

/// A quote row with every figure already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRow {
    pub name: String,
    pub pair: String,
    pub ask: String,
    pub bid: String,
    pub volume: String,
}

impl From<&QuoteRow> for ExchangeRow {
    fn from(row: &QuoteRow) -> Self {
        match row {
            QuoteRow::Quote(quote) => Self {
                name: quote.source_name.clone(),
                pair: quote.pair_label.clone(),
                ask: money::render(quote.ticker.ask),
                bid: money::render(quote.ticker.bid),
                volume: money::render(quote.ticker.volume),
            },
            QuoteRow::Error(error) => Self {
                name: error.source_name.clone(),
                pair: error.pair_label.clone(),
                ask: ERROR_SENTINEL.to_string(),
                bid: ERROR_SENTINEL.to_string(),
                volume: ERROR_SENTINEL.to_string(),
            },
        }
    }
}

/// Context of the `market.status` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketStatusContext {
    pub exchanges: Vec<ExchangeRow>,
    pub date: String,
}

impl MarketStatusContext {
    pub fn new(rows: &[QuoteRow], date: impl Into<String>) -> Self {
        Self {
            exchanges: rows.iter().map(ExchangeRow::from).collect(),
            date: date.into(),
        }
    }
}
