//! Quote-shaped records shared by the server and the client.
//!
//! A `Quote` is the common shape behind the market index cards: a symbol, a display
//! name, the last price and the day's change. `TickerQuote` is the slimmer record used
//! by the scrolling ticker tape.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Direction label shown next to a price change.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Trend {
    /// Positive change.
    Up,
    /// Zero or negative change.
    Down,
}

impl Trend {
    /// `Up` when `change` is strictly positive, `Down` otherwise.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 { Trend::Up } else { Trend::Down }
    }
}

/// Last price and daily change for a named instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol identifier (e.g., `AAPL`, `^GSPC`).
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Last traded price.
    pub price: f64,
    /// Absolute change since the previous close.
    pub change: f64,
    /// Change in percent.
    pub percent_change: f64,
    /// Direction label.
    pub trend: Trend,
}

impl Quote {
    /// Build a quote whose trend follows the sign of `change`.
    pub fn new(symbol: &str, name: &str, price: f64, change: f64, percent_change: f64) -> Self {
        Quote {
            symbol: String::from(symbol),
            name: String::from(name),
            price,
            change,
            percent_change,
            trend: Trend::from_change(change),
        }
    }

    /// True when the trend label agrees with the sign of the change.
    pub fn is_consistent(&self) -> bool {
        self.trend == Trend::from_change(self.change)
    }
}

/// A market index card is a quote for an index symbol.
pub type MarketIndex = Quote;

/// Entry of the scrolling ticker tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    /// Symbol identifier.
    pub symbol: String,
    /// Short company name shown on the tape.
    pub company_name: String,
    /// Last traded price.
    pub price: f64,
    /// Absolute change.
    pub change: f64,
    /// Change in percent.
    pub percent_change: f64,
}

impl From<Quote> for TickerQuote {
    fn from(quote: Quote) -> Self {
        TickerQuote {
            symbol: quote.symbol,
            company_name: quote.name,
            price: quote.price,
            change: quote.change,
            percent_change: quote.percent_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_follows_sign_of_change() {
        assert_eq!(Trend::from_change(0.01), Trend::Up);
        assert_eq!(Trend::from_change(0.0), Trend::Down);
        assert_eq!(Trend::from_change(-1.23), Trend::Down);
    }

    #[test]
    fn trend_serializes_lowercase() {
        let quote = Quote::new("^VIX", "VIX", 18.45, -1.23, -6.25);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["trend"], "down");
        assert_eq!("UP".parse::<Trend>().unwrap(), Trend::Up);
    }

    #[test]
    fn ticker_quote_takes_name_as_company_name() {
        let tape: TickerQuote = Quote::new("AAPL", "Apple", 175.43, 2.15, 1.24).into();
        assert_eq!(tape.company_name, "Apple");
        let json = serde_json::to_value(&tape).unwrap();
        assert!(json.get("trend").is_none());
    }
}
