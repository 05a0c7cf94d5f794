//! Which exchanges quote which pair

use crate::api::{CurrencyPair, QuoteSource};
use std::fmt;
use std::sync::Arc;

/// Ordered routing table from pair to exchanges
///
/// The order of pairs is the order commands are registered in, and the order
/// of sources is the order rows are displayed in.
#[derive(Clone, Default)]
pub struct MarketBook {
    routes: Vec<(CurrencyPair, Vec<Arc<dyn QuoteSource>>)>,
}

impl MarketBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The production table: BTC/CLP from SurBTC, ETH/CLP from CryptoMKT then SurBTC
    pub fn standard(surbtc: Arc<dyn QuoteSource>, cryptomkt: Arc<dyn QuoteSource>) -> Self {
        Self::new()
            .with_route(CurrencyPair::BTC_CLP, vec![surbtc.clone()])
            .with_route(CurrencyPair::ETH_CLP, vec![cryptomkt, surbtc])
    }

    /// Add or replace the sources for `pair`
    pub fn with_route(mut self, pair: CurrencyPair, sources: Vec<Arc<dyn QuoteSource>>) -> Self {
        if let Some(route) = self.routes.iter_mut().find(|(p, _)| *p == pair) {
            route.1 = sources;
        } else {
            self.routes.push((pair, sources));
        }
        self
    }

    /// Sources configured for `pair`, empty when the pair is unknown
    pub fn sources(&self, pair: CurrencyPair) -> &[Arc<dyn QuoteSource>] {
        self.routes
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|(_, sources)| sources.as_slice())
            .unwrap_or(&[])
    }

    /// Pairs in registration order
    pub fn pairs(&self) -> impl Iterator<Item = CurrencyPair> + '_ {
        self.routes.iter().map(|(pair, _)| *pair)
    }
}

impl fmt::Debug for MarketBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (pair, sources) in &self.routes {
            let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
            map.entry(&pair.label(), &names);
        }
        map.finish()
    }
}
