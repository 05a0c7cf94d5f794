//! Quote aggregation across exchanges
//!
//! A [`MarketBook`] lists which exchanges quote each pair. The
//! [`Aggregator`] asks all of them at once and turns every answer, good or
//! bad, into one [`QuoteRow`].

pub mod aggregator;
pub mod book;

pub use aggregator::{Aggregator, ERROR_SENTINEL, Quote, QuoteError, QuoteRow, aggregate};
pub use book::MarketBook;
