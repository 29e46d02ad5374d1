//! Search catalog entries, instrument types and catalog file parsing.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum_macros::{Display, EnumString};

use crate::error::MarketError;

/// Kind of listed instrument.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InstrumentType {
    /// Common stock.
    Stock,
    /// Exchange traded fund.
    Etf,
}

/// Client-side instrument type toggle applied to search results.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Display, EnumString, Eq, PartialEq)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TypeFilter {
    /// Every instrument type.
    #[default]
    All,
    /// Stocks only.
    Stock,
    /// ETFs only.
    Etf,
}

impl TypeFilter {
    /// Whether an entry passes this filter.
    pub fn admits(&self, entry: &SearchCatalogEntry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Stock => entry.instrument_type == InstrumentType::Stock,
            TypeFilter::Etf => entry.instrument_type == InstrumentType::Etf,
        }
    }
}

/// One searchable listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCatalogEntry {
    /// Ticker symbol.
    pub symbol: String,
    /// Company or fund name.
    pub name: String,
    /// Listing exchange.
    pub exchange: String,
    /// Instrument type (`type` on the wire).
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
}

impl SearchCatalogEntry {
    /// Creates a new entry.
    pub fn new(symbol: &str, name: &str, exchange: &str, instrument_type: InstrumentType) -> Self {
        SearchCatalogEntry {
            symbol: String::from(symbol),
            name: String::from(name),
            exchange: String::from(exchange),
            instrument_type,
        }
    }

    /// Case-insensitive substring match on symbol or name. An empty query matches.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.symbol.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

/// The six listings searchable out of the box, in display order.
pub fn default_catalog() -> Vec<SearchCatalogEntry> {
    use InstrumentType::Stock;
    vec![
        SearchCatalogEntry::new("AAPL", "Apple Inc.", "NASDAQ", Stock),
        SearchCatalogEntry::new("GOOGL", "Alphabet Inc.", "NASDAQ", Stock),
        SearchCatalogEntry::new("MSFT", "Microsoft Corporation", "NASDAQ", Stock),
        SearchCatalogEntry::new("TSLA", "Tesla Inc.", "NASDAQ", Stock),
        SearchCatalogEntry::new("AMZN", "Amazon.com Inc.", "NASDAQ", Stock),
        SearchCatalogEntry::new("META", "Meta Platforms Inc.", "NASDAQ", Stock),
    ]
}

/// Trait providing file parsing for catalogs.
pub trait CatalogParser {
    /// Parses catalog entries from a buffered reader.
    ///
    /// Each non-empty line not starting with `#` holds `SYMBOL|Name|EXCHANGE|type`.
    /// Returns an error naming the first line that cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<SearchCatalogEntry>, MarketError>;
}

impl CatalogParser for SearchCatalogEntry {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, MarketError> {
        let mut entries = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(MarketError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed_line.split('|').map(str::trim).collect();
            let [symbol, name, exchange, kind] = fields.as_slice() else {
                return Err(MarketError::ParseCatalog(format!(
                    "line {}: expected 4 fields, got {}",
                    index + 1,
                    fields.len()
                )));
            };
            if symbol.is_empty() || name.is_empty() {
                return Err(MarketError::ParseCatalog(format!(
                    "line {}: empty symbol or name",
                    index + 1
                )));
            }
            let instrument_type = kind.parse::<InstrumentType>().map_err(|e| {
                MarketError::ParseCatalog(format!("line {}: {} ({})", index + 1, e, kind))
            })?;
            entries.push(SearchCatalogEntry::new(symbol, name, exchange, instrument_type));
        }
        Ok(entries)
    }
}
