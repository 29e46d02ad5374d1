//! Per-symbol stock snapshot returned by the stock data route.
//!
//! The snapshot bundles the current session quote, valuation metrics, technical
//! indicators and a daily OHLCV history ordered oldest first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quote::Trend;

/// Number of daily bars carried by every snapshot.
pub const HISTORY_DAYS: usize = 30;

/// Current session quote (`current_data` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionQuote {
    /// Last traded price.
    pub price: f64,
    /// Absolute change since the previous close.
    pub change: f64,
    /// Change in percent.
    pub percent_change: f64,
    /// Direction label.
    pub trend: Trend,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Shares traded in the session.
    pub volume: u64,
    /// RFC 3339 UTC instant the snapshot was taken.
    pub date: String,
}

/// Valuation metrics (`market_data` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationMetrics {
    /// Market capitalisation in currency units.
    pub market_cap: u64,
    /// Price to earnings ratio.
    pub pe_ratio: f64,
    /// Dividend yield in percent.
    pub dividend_yield: f64,
    /// Beta against the broad market.
    pub beta: f64,
    /// Highest price over the last 52 weeks.
    #[serde(rename = "52_week_high")]
    pub week_52_high: f64,
    /// Lowest price over the last 52 weeks.
    #[serde(rename = "52_week_low")]
    pub week_52_low: f64,
}

/// Technical indicators panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    /// 20-day simple moving average.
    pub sma_20: f64,
    /// 50-day simple moving average.
    pub sma_50: f64,
    /// Annualised volatility in percent.
    pub volatility: f64,
    /// Relative strength index, 0 to 100.
    pub rsi: f64,
}

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
}

impl DailyBar {
    /// True when high and low bracket both open and close.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// Full snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// Symbol exactly as requested.
    pub symbol: String,
    /// Company display name.
    pub company_name: String,
    /// Current session quote.
    pub current_data: SessionQuote,
    /// Valuation metrics.
    pub market_data: ValuationMetrics,
    /// Technical indicators.
    pub technical_indicators: TechnicalIndicators,
    /// Daily bars, oldest first.
    pub historical_data: Vec<DailyBar>,
}

/// Company name shown for a symbol that has no catalog-backed display name.
pub fn company_name_for(symbol: &str) -> String {
    match symbol {
        "AAPL" => String::from("Apple Inc."),
        other => format!("{} Corporation", other),
    }
}
