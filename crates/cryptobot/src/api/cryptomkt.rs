//! CryptoMKT API client

use super::{
    Currency, CurrencyPair, ExchangeError, ExchangeResult, QuoteSource, Ticker, parse_amount,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const NAME: &str = "CryptoMKT";
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomkt.com";

/// CryptoMKT API client
#[derive(Debug, Clone)]
pub struct CryptoMktClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<RawTicker>,
}

#[derive(Debug, Deserialize)]
struct RawTicker {
    market: String,
    ask: String,
    bid: String,
    volume: String,
}

impl CryptoMktClient {
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
        format!("{}{}", pair.base.code(), pair.quote.code())
    }
}

fn parse_ticker(body: &str, market: &str) -> ExchangeResult<Ticker> {
    let response: TickerResponse = serde_json::from_str(body).map_err(|e| ExchangeError::Parse {
        exchange: NAME.to_string(),
        detail: e.to_string(),
    })?;

    if response.status != "success" {
        return Err(ExchangeError::Api {
            exchange: NAME.to_string(),
            message: response.message.unwrap_or(response.status),
        });
    }

    let raw = response
        .data
        .into_iter()
        .find(|t| t.market.eq_ignore_ascii_case(market))
        .ok_or_else(|| ExchangeError::Parse {
            exchange: NAME.to_string(),
            detail: format!("no ticker for market {market}"),
        })?;

    Ok(Ticker {
        ask: parse_amount(NAME, "ask", &raw.ask)?,
        bid: parse_amount(NAME, "bid", &raw.bid)?,
        volume: parse_amount(NAME, "volume", &raw.volume)?,
    })
}

#[async_trait]
impl QuoteSource for CryptoMktClient {
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

        let market = Self::market_id(pair);
        let url = format!("{}/v1/ticker", self.base_url);
        debug!(%url, %market, "Requesting CryptoMKT ticker");

        let response = self
            .client
            .get(&url)
            .query(&[("market", market.as_str())])
            .send()
            .await
            .map_err(|e| ExchangeError::from_reqwest(NAME, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_reqwest(NAME, e))?;

        // Error payloads come with a 4xx status and a JSON message
        match parse_ticker(&body, &market) {
            Err(ExchangeError::Parse { .. }) if !status.is_success() => {
                Err(ExchangeError::Status {
                    exchange: NAME.to_string(),
                    status: status.as_u16(),
                })
            }
            result => result,
        }
    }
}
