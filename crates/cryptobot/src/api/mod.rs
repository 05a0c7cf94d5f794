//! API clients for exchange quote providers
//!
//! Every exchange is wrapped behind [`QuoteSource`], which answers one
//! question: the current ask, bid and volume for a currency pair.

pub mod cryptomkt;
pub mod surbtc;

pub use cryptomkt::CryptoMktClient;
pub use surbtc::SurBtcClient;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failure of a single exchange request
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The request did not complete within the adapter timeout
    #[error("{exchange} timed out")]
    Timeout { exchange: String },

    /// Network or HTTP error
    #[error("{exchange} request failed: {source}")]
    Http {
        exchange: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{exchange} returned HTTP {status}")]
    Status { exchange: String, status: u16 },

    /// The exchange answered with an error payload
    #[error("{exchange} error: {message}")]
    Api { exchange: String, message: String },

    /// The payload could not be understood
    #[error("{exchange} sent an unexpected payload: {detail}")]
    Parse { exchange: String, detail: String },

    /// The exchange does not list the pair
    #[error("{exchange} does not list {pair}")]
    UnsupportedPair { exchange: String, pair: CurrencyPair },
}

impl ExchangeError {
    /// Classify a transport error, separating timeouts from the rest
    pub fn from_reqwest(exchange: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ExchangeError::Timeout {
                exchange: exchange.to_string(),
            }
        } else {
            ExchangeError::Http {
                exchange: exchange.to_string(),
                source,
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ExchangeError::Timeout { .. })
    }
}

/// Result type alias for exchange requests
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;

/// Currencies the bot quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Btc,
    Eth,
    Clp,
}

impl Currency {
    /// Upper-case ticker code
    pub fn code(self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
            Currency::Clp => "CLP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A base/quote pair such as BTC/CLP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub const BTC_CLP: CurrencyPair = CurrencyPair::new(Currency::Btc, Currency::Clp);
    pub const ETH_CLP: CurrencyPair = CurrencyPair::new(Currency::Eth, Currency::Clp);

    pub const fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Display label, e.g. `BTC/CLP`
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Bot command that quotes this pair, e.g. `btc`
    pub fn command(&self) -> String {
        self.base.code().to_lowercase()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Current market summary for a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub ask: f64,
    pub bid: f64,
    pub volume: f64,
}

/// An exchange that can quote currency pairs
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Human-readable exchange name
    fn name(&self) -> &str;

    /// Whether the exchange lists `pair`
    fn supports(&self, pair: CurrencyPair) -> bool;

    /// Fetch the current ticker for `pair`
    async fn ticker(&self, pair: CurrencyPair) -> ExchangeResult<Ticker>;
}

/// HTTP client shared by the adapters, with the request timeout applied
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Parse a decimal amount the exchanges send as a string
pub(crate) fn parse_amount(exchange: &str, field: &str, raw: &str) -> ExchangeResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ExchangeError::Parse {
            exchange: exchange.to_string(),
            detail: format!("{field} '{raw}': {e}"),
        })
}
