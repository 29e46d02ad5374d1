//!
//! Common types and utilities shared by the market data server and the dashboard client.
//!
//! This crate aggregates:
//! - `error`: unified error type `MarketError` used across the workspace.
//! - `result`: handy `Result<T, MarketError>` alias.
//! - `quote`: quote-shaped records (indices, ticker tape entries) and the `Trend` label.
//! - `snapshot`: the per-symbol stock snapshot returned by the stock data route.
//! - `catalog`: the search catalog, instrument types and the catalog file parser.
//! - `api`: JSON response envelopes and route payloads.
//! - `logo`: logo URL selection for symbols.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod api;
pub mod catalog;
pub mod error;
pub mod logo;
pub mod net;
pub mod quote;
pub mod result;
pub mod snapshot;

pub use error::MarketError;
pub use result::Result;
