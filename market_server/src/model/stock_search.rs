//! Catalog search.
//!
//! The provider reads entries through a `CatalogSource`, so a catalog that lives
//! outside the process can replace the in-memory one.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use market_common::Result;
use market_common::api::SearchResults;
use market_common::catalog::{CatalogParser, SearchCatalogEntry, default_catalog};

/// Where search entries come from.
pub trait CatalogSource: Send + Sync {
    /// Every entry, in catalog order.
    fn entries(&self) -> Result<Vec<SearchCatalogEntry>>;
}

impl CatalogSource for Vec<SearchCatalogEntry> {
    fn entries(&self) -> Result<Vec<SearchCatalogEntry>> {
        Ok(self.clone())
    }
}

/// Filters a catalog by case-insensitive substring.
pub struct StockSearchProvider {
    catalog: Arc<dyn CatalogSource>,
}

impl Default for StockSearchProvider {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl StockSearchProvider {
    /// Provider over an in-memory `catalog`, searched in the given order.
    pub fn new(catalog: Vec<SearchCatalogEntry>) -> Self {
        Self::with_source(Arc::new(catalog))
    }

    /// Provider over any catalog source.
    pub fn with_source(catalog: Arc<dyn CatalogSource>) -> Self {
        Self { catalog }
    }

    /// Loads the catalog from a `SYMBOL|Name|EXCHANGE|type` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let catalog = SearchCatalogEntry::parse_from_file(BufReader::new(file))?;
        info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(Self::new(catalog))
    }

    /// Symbols in catalog order.
    pub fn symbols(&self) -> Result<Vec<String>> {
        Ok(self.catalog.entries()?.into_iter().map(|e| e.symbol).collect())
    }

    /// Every entry whose symbol or name contains `query`, ignoring case, in catalog order.
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let results: Vec<SearchCatalogEntry> = self
            .catalog
            .entries()?
            .into_iter()
            .filter(|entry| entry.matches(query))
            .collect();
        debug!("Search {:?} matched {} entries", query, results.len());
        Ok(SearchResults { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 6)]
    #[case("aapl", 1)]
    #[case("AAPL", 1)]
    #[case("zzz", 0)]
    #[case("inc", 5)]
    #[case("m", 3)]
    fn counts_matches(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(StockSearchProvider::default().search(query).unwrap().results.len(), expected);
    }

    #[test]
    fn keeps_catalog_order() {
        let results = StockSearchProvider::default().search("o").unwrap().results;
        let symbols: Vec<&str> = results.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GOOGL", "MSFT", "AMZN", "META"]);
    }

    #[test]
    fn same_query_same_results() {
        let provider = StockSearchProvider::default();
        assert_eq!(provider.search("ma").unwrap(), provider.search("ma").unwrap());
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let err = StockSearchProvider::from_file(Path::new("/nonexistent/catalog.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, market_common::MarketError::Io(_)));
    }

    struct UnavailableCatalog;

    impl CatalogSource for UnavailableCatalog {
        fn entries(&self) -> Result<Vec<SearchCatalogEntry>> {
            Err(market_common::MarketError::Network(String::from("catalog offline")))
        }
    }

    #[test]
    fn catalog_failure_propagates() {
        let provider = StockSearchProvider::with_source(Arc::new(UnavailableCatalog));
        assert!(provider.search("a").is_err());
        assert!(provider.symbols().is_err());
    }
}
