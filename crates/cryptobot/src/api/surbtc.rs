//! SurBTC API client

use super::{
    Currency, CurrencyPair, ExchangeError, ExchangeResult, QuoteSource, Ticker, parse_amount,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const NAME: &str = "SurBTC";
pub const DEFAULT_BASE_URL: &str = "https://www.surbtc.com";

/// SurBTC API client
#[derive(Debug, Clone)]
pub struct SurBtcClient {
    client: Client,
    base_url: String,
}

/// `[amount, currency]` as sent by the API
type Amount = (String, String);

#[derive(Debug, Deserialize)]
struct TickerResponse {
    ticker: RawTicker,
}

#[derive(Debug, Deserialize)]
struct RawTicker {
    min_ask: Amount,
    max_bid: Amount,
    volume: Amount,
}

impl SurBtcClient {
    /// Create a client against the public API
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Create a client against another host
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn market_id(pair: CurrencyPair) -> String {
        format!("{}-{}", pair.base.code(), pair.quote.code()).to_lowercase()
    }

    fn ticker_url(&self, pair: CurrencyPair) -> String {
        format!(
            "{}/api/v2/markets/{}/ticker",
            self.base_url,
            Self::market_id(pair)
        )
    }
}

fn parse_ticker(body: &str) -> ExchangeResult<Ticker> {
    let response: TickerResponse = serde_json::from_str(body).map_err(|e| ExchangeError::Parse {
        exchange: NAME.to_string(),
        detail: e.to_string(),
    })?;

    let raw = response.ticker;
    Ok(Ticker {
        ask: parse_amount(NAME, "min_ask", &raw.min_ask.0)?,
        bid: parse_amount(NAME, "max_bid", &raw.max_bid.0)?,
        volume: parse_amount(NAME, "volume", &raw.volume.0)?,
    })
}

#[async_trait]
impl QuoteSource for SurBtcClient {
    fn name(&self) -> &str {
        NAME
    }

    fn supports(&self, pair: CurrencyPair) -> bool {
        pair.quote == Currency::Clp && matches!(pair.base, Currency::Btc | Currency::Eth)
    }

    async fn ticker(&self, pair: CurrencyPair) -> ExchangeResult<Ticker> {
        if !self.supports(pair) {
            return Err(ExchangeError::UnsupportedPair {
                exchange: NAME.to_string(),
                pair,
            });
        }

        let url = self.ticker_url(pair);
        debug!(%url, "Requesting SurBTC ticker");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExchangeError::from_reqwest(NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status {
                exchange: NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_reqwest(NAME, e))?;
        parse_ticker(&body)
    }
}
