//! Domain models and providers for the market data server.
//!
//! This module groups the data producers behind the HTTP routes:
//! - `quote_source`: the `QuoteSource` capability with its static and synthetic variants.
//! - `market_overview`: the four index cards.
//! - `stock_data`: per-symbol snapshots.
//! - `stock_search`: catalog search.
//! - `ticker_tape`: the scrolling ticker tape.

pub mod market_overview;
pub mod quote_source;
pub mod stock_data;
pub mod stock_search;
pub mod ticker_tape;
