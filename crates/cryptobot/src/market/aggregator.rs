//! Concurrent quote requests with per-source failure isolation

use super::MarketBook;
use crate::api::{CurrencyPair, QuoteSource, Ticker};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Text shown in place of every figure of a failed source
pub const ERROR_SENTINEL: &str = "ERROR";

/// A successful quote
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub pair_label: String,
    pub source_name: String,
    pub ticker: Ticker,
}

/// A source that failed or timed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteError {
    pub pair_label: String,
    pub source_name: String,
    pub reason: String,
}

/// One display row per configured source
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteRow {
    Quote(Quote),
    Error(QuoteError),
}

impl QuoteRow {
    pub fn source_name(&self) -> &str {
        match self {
            QuoteRow::Quote(q) => &q.source_name,
            QuoteRow::Error(e) => &e.source_name,
        }
    }

    pub fn pair_label(&self) -> &str {
        match self {
            QuoteRow::Quote(q) => &q.pair_label,
            QuoteRow::Error(e) => &e.pair_label,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QuoteRow::Error(_))
    }
}

/// Ask every source for `pair` at once and wait for all of them
///
/// The result has one row per source, in source order. A failing source
/// becomes a [`QuoteError`] row and never affects the others.
pub async fn aggregate(sources: &[Arc<dyn QuoteSource>], pair: CurrencyPair) -> Vec<QuoteRow> {
    let pair_label = pair.label();

    let requests = sources.iter().map(|source| async move {
        let result = source.ticker(pair).await;
        (source, result)
    });

    join_all(requests)
        .await
        .into_iter()
        .map(|(source, result)| match result {
            Ok(ticker) => {
                debug!(source = source.name(), pair = %pair_label, "Quote received");
                QuoteRow::Quote(Quote {
                    pair_label: pair_label.clone(),
                    source_name: source.name().to_string(),
                    ticker,
                })
            }
            Err(e) => {
                warn!(source = source.name(), pair = %pair_label, error = %e, "Quote source failed");
                QuoteRow::Error(QuoteError {
                    pair_label: pair_label.clone(),
                    source_name: source.name().to_string(),
                    reason: ERROR_SENTINEL.to_string(),
                })
            }
        })
        .collect()
}

/// Aggregates quotes for the pairs of a [`MarketBook`]
#[derive(Debug, Clone)]
pub struct Aggregator {
    book: MarketBook,
}

impl Aggregator {
    pub fn new(book: MarketBook) -> Self {
        Self { book }
    }

    /// Rows for `pair`; empty when no source is configured
    pub async fn quotes(&self, pair: CurrencyPair) -> Vec<QuoteRow> {
        aggregate(self.book.sources(pair), pair).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingSource, SlowSource, StaticSource};
    use std::time::Duration;

    fn eth_book(first: Arc<dyn QuoteSource>, second: Arc<dyn QuoteSource>) -> Aggregator {
        Aggregator::new(MarketBook::new().with_route(CurrencyPair::ETH_CLP, vec![first, second]))
    }

    #[tokio::test]
    async fn test_all_sources_succeed() {
        let aggregator = eth_book(
            Arc::new(StaticSource::new("CryptoMKT", 200.0, 190.0, 10.0)),
            Arc::new(StaticSource::new("SurBTC", 201.0, 189.0, 3.0)),
        );

        let rows = aggregator.quotes(CurrencyPair::ETH_CLP).await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_error()));
        assert_eq!(rows[0].source_name(), "CryptoMKT");
        assert_eq!(rows[1].source_name(), "SurBTC");
        assert!(rows.iter().all(|r| r.pair_label() == "ETH/CLP"));
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let aggregator = eth_book(
            Arc::new(FailingSource::new("CryptoMKT")),
            Arc::new(StaticSource::new("SurBTC", 201.0, 189.0, 3.0)),
        );

        let rows = aggregator.quotes(CurrencyPair::ETH_CLP).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            QuoteRow::Error(QuoteError {
                pair_label: "ETH/CLP".to_string(),
                source_name: "CryptoMKT".to_string(),
                reason: ERROR_SENTINEL.to_string(),
            })
        );
        assert!(matches!(&rows[1], QuoteRow::Quote(q) if q.ticker.ask == 201.0));
    }

    #[tokio::test]
    async fn test_row_count_matches_sources_when_all_fail() {
        let aggregator = eth_book(
            Arc::new(FailingSource::new("CryptoMKT")),
            Arc::new(FailingSource::new("SurBTC")),
        );

        let rows = aggregator.quotes(CurrencyPair::ETH_CLP).await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(QuoteRow::is_error));
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_run_concurrently_and_keep_order() {
        let aggregator = eth_book(
            Arc::new(SlowSource::new("Slow", Duration::from_secs(3))),
            Arc::new(StaticSource::new("Fast", 1.0, 1.0, 1.0)),
        );

        let started = tokio::time::Instant::now();
        let rows = aggregator.quotes(CurrencyPair::ETH_CLP).await;

        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(rows[0].source_name(), "Slow");
        assert!(rows[0].is_error());
        assert_eq!(rows[1].source_name(), "Fast");
        assert!(!rows[1].is_error());
    }

    #[tokio::test]
    async fn test_unknown_pair_yields_no_rows() {
        let aggregator = Aggregator::new(MarketBook::new());
        assert!(aggregator.quotes(CurrencyPair::BTC_CLP).await.is_empty());
    }
}
