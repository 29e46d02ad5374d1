//! Per-symbol stock snapshots.

use std::sync::Arc;

use log::debug;
use market_common::Result;
use market_common::snapshot::StockSnapshot;

use crate::model::quote_source::QuoteSource;

/// Symbol used when the request names none.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Answers stock data requests from a quote source.
pub struct StockDataProvider {
    source: Arc<dyn QuoteSource>,
}

impl StockDataProvider {
    /// Provider backed by `source`.
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Snapshot for `symbol`, or for `DEFAULT_SYMBOL` when absent or empty.
    ///
    /// Any symbol is accepted and echoed back unchanged. `period` is accepted for
    /// compatibility and does not change the history length.
    pub fn snapshot(&self, symbol: Option<&str>, period: Option<&str>) -> Result<StockSnapshot> {
        let symbol = symbol.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SYMBOL);
        debug!(
            "Building snapshot for {} (period {:?}) from {}",
            symbol,
            period,
            self.source.name()
        );
        self.source.snapshot(symbol)
    }
}
