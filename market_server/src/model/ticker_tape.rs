//! Scrolling ticker tape.

use std::sync::Arc;

use log::debug;
use market_common::Result;
use market_common::api::TickerTape;
use market_common::quote::{Quote, TickerQuote};

use crate::model::quote_source::{QuoteSource, StaticSource};

/// Fixed tape served while no live feed is configured.
pub fn tape_source() -> StaticSource {
    StaticSource::new(
        "static-tape",
        vec![
            Quote::new("AAPL", "Apple", 175.43, 2.15, 1.24),
            Quote::new("GOOGL", "Google", 2847.52, -15.30, -0.53),
            Quote::new("MSFT", "Microsoft", 378.85, 4.12, 1.10),
            Quote::new("AMZN", "Amazon", 3342.88, -8.75, -0.26),
            Quote::new("TSLA", "Tesla", 248.50, 12.30, 5.20),
            Quote::new("META", "Meta", 331.25, 6.80, 2.10),
            Quote::new("NVDA", "NVIDIA", 875.28, 18.45, 2.15),
            Quote::new("NFLX", "Netflix", 485.73, -3.22, -0.66),
            Quote::new("AMD", "AMD", 142.18, 2.85, 2.05),
            Quote::new("INTC", "Intel", 43.67, -0.45, -1.02),
            Quote::new("CRM", "Salesforce", 267.34, 5.12, 1.95),
            Quote::new("ORCL", "Oracle", 118.92, 1.88, 1.61),
            Quote::new("IBM", "IBM", 165.45, -1.23, -0.74),
            Quote::new("UBER", "Uber", 62.18, 1.45, 2.39),
            Quote::new("SPOT", "Spotify", 178.92, 3.67, 2.09),
            Quote::new("PYPL", "PayPal", 58.34, -0.89, -1.50),
            Quote::new("ADBE", "Adobe", 567.23, 8.45, 1.51),
            Quote::new("SHOP", "Shopify", 67.89, 2.34, 3.57),
        ],
    )
}

/// Builds the ticker tape from a quote source.
pub struct TickerTapeProvider {
    source: Arc<dyn QuoteSource>,
    symbols: Vec<String>,
}

impl Default for TickerTapeProvider {
    fn default() -> Self {
        let source = tape_source();
        let symbols = source.symbols();
        Self {
            source: Arc::new(source),
            symbols,
        }
    }
}

impl TickerTapeProvider {
    /// Provider listing `symbols` from `source`.
    pub fn new(source: Arc<dyn QuoteSource>, symbols: Vec<String>) -> Self {
        Self { source, symbols }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Tape entries in configured order.
    pub fn tape(&self) -> Result<TickerTape> {
        let tickers = self
            .symbols
            .iter()
            .map(|symbol| self.source.quote(symbol).map(TickerQuote::from))
            .collect::<Result<Vec<_>>>()?;
        debug!("Ticker tape built with {} entries", tickers.len());
        Ok(TickerTape { tickers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quote_source::SyntheticRandomSource;

    #[test]
    fn default_tape_has_eighteen_entries() {
        let tape = TickerTapeProvider::default().tape().unwrap();
        assert_eq!(tape.tickers.len(), 18);
        assert_eq!(tape.tickers[0].company_name, "Apple");
        assert_eq!(tape.tickers[17].symbol, "SHOP");
    }

    #[test]
    fn synthetic_tape_moves_between_refreshes() {
        let provider = TickerTapeProvider::new(
            Arc::new(SyntheticRandomSource::default()),
            vec![String::from("AAPL"), String::from("MSFT")],
        );
        let first = provider.tape().unwrap();
        let second = provider.tape().unwrap();
        assert_eq!(first.tickers.len(), 2);
        assert_ne!(first, second);
    }
}
