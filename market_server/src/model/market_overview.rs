//! Market index cards.

use std::sync::Arc;

use log::debug;
use market_common::Result;
use market_common::api::MarketOverview;
use market_common::quote::Quote;

use crate::model::quote_source::{QuoteSource, StaticSource};

/// Index symbols shown on the overview, in display order.
pub const INDEX_SYMBOLS: [&str; 4] = ["^GSPC", "^DJI", "^IXIC", "^VIX"];

/// Illustrative index values served while no live feed is configured.
pub fn index_source() -> StaticSource {
    StaticSource::new(
        "static-indices",
        vec![
            Quote::new("^GSPC", "S&P 500", 4567.89, 12.45, 0.27),
            Quote::new("^DJI", "Dow Jones", 34567.12, -45.67, -0.13),
            Quote::new("^IXIC", "NASDAQ", 14234.56, 89.34, 0.63),
            Quote::new("^VIX", "VIX", 18.45, -1.23, -6.25),
        ],
    )
}

/// Builds the market overview from a quote source.
pub struct MarketOverviewProvider {
    source: Arc<dyn QuoteSource>,
    symbols: Vec<String>,
}

impl MarketOverviewProvider {
    /// Provider listing `symbols` from `source`.
    pub fn new(source: Arc<dyn QuoteSource>, symbols: &[&str]) -> Self {
        Self {
            source,
            symbols: symbols.iter().map(|s| String::from(*s)).collect(),
        }
    }

    /// The four static indices.
    pub fn with_default_indices() -> Self {
        Self::new(Arc::new(index_source()), &INDEX_SYMBOLS)
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// All index cards; the first failing lookup fails the whole overview.
    pub fn overview(&self) -> Result<MarketOverview> {
        let market_data = self
            .symbols
            .iter()
            .map(|symbol| self.source.quote(symbol))
            .collect::<Result<Vec<_>>>()?;
        debug!("Market overview built with {} indices", market_data.len());
        Ok(MarketOverview { market_data })
    }
}
