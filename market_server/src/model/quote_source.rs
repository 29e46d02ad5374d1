//! Quote sources behind the market data routes.
//!
//! A `QuoteSource` answers two questions for a symbol: its latest quote and its full
//! snapshot. Two sources exist:
//!
//! - `StaticSource`: a fixed table of quotes; it cannot produce snapshots.
//! - `SyntheticRandomSource`: draws every numeric field uniformly from a documented
//!   range on each call, so two calls for the same symbol never agree.
//!
//! A live feed plugs in by implementing the same trait; providers only see
//! `Arc<dyn QuoteSource>`.

use std::ops::Range;

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use clap::ValueEnum;
use market_common::MarketError;
use market_common::Result;
use market_common::quote::{Quote, Trend};
use market_common::snapshot::{
    DailyBar, HISTORY_DAYS, SessionQuote, StockSnapshot, TechnicalIndicators, ValuationMetrics,
    company_name_for,
};
use rand::Rng;
use rand::distr::{Distribution, Uniform};
use strum_macros::{Display, EnumString};

/// Capability shared by every quote backend.
pub trait QuoteSource: Send + Sync {
    /// Short name reported by the health route.
    fn name(&self) -> &'static str;

    /// Latest quote for `symbol`.
    fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Full snapshot for `symbol`.
    fn snapshot(&self, symbol: &str) -> Result<StockSnapshot>;
}

/// Fixed table of quotes.
pub struct StaticSource {
    name: &'static str,
    entries: Vec<Quote>,
}

impl StaticSource {
    /// Create a source serving `entries` under `name`.
    pub fn new(name: &'static str, entries: Vec<Quote>) -> Self {
        Self { name, entries }
    }

    /// Symbols in table order.
    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|q| q.symbol.clone()).collect()
    }
}

impl QuoteSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn quote(&self, symbol: &str) -> Result<Quote> {
        self.entries
            .iter()
            .find(|q| q.symbol == symbol)
            .cloned()
            .ok_or_else(|| MarketError::UnknownSymbol(String::from(symbol)))
    }

    fn snapshot(&self, symbol: &str) -> Result<StockSnapshot> {
        Err(MarketError::Unsupported {
            source_name: self.name,
            what: format!("snapshot for {}", symbol),
        })
    }
}

/// Whether related random fields are kept consistent with each other.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Display, EnumString, Eq, PartialEq)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GenerationMode {
    /// Trend and percent follow the sign of change; highs and lows bracket their prices.
    #[default]
    Consistent,
    /// Every field is an independent draw, trend included.
    Independent,
}

/// Generation ranges, half-open.
pub mod ranges {
    use std::ops::Range;

    /// Current price.
    pub const PRICE: Range<f64> = 100.0..300.0;
    /// Absolute daily change.
    pub const CHANGE: Range<f64> = -5.0..5.0;
    /// Daily change in percent.
    pub const PERCENT_CHANGE: Range<f64> = -2.5..2.5;
    /// Session and bar high.
    pub const HIGH: Range<f64> = 110.0..330.0;
    /// Session and bar low.
    pub const LOW: Range<f64> = 90.0..270.0;
    /// Session and bar volume.
    pub const VOLUME: Range<u64> = 0..100_000_000;
    /// Market capitalisation.
    pub const MARKET_CAP: Range<u64> = 0..1_000_000_000_000;
    /// Price to earnings.
    pub const PE_RATIO: Range<f64> = 10.0..40.0;
    /// Dividend yield.
    pub const DIVIDEND_YIELD: Range<f64> = 0.0..3.0;
    /// Beta.
    pub const BETA: Range<f64> = 0.0..2.0;
    /// 52-week high.
    pub const WEEK_52_HIGH: Range<f64> = 150.0..400.0;
    /// 52-week low.
    pub const WEEK_52_LOW: Range<f64> = 50.0..200.0;
    /// Both moving averages.
    pub const SMA: Range<f64> = 100.0..300.0;
    /// Volatility in percent.
    pub const VOLATILITY: Range<f64> = 10.0..60.0;
    /// Relative strength index.
    pub const RSI: Range<f64> = 0.0..100.0;
    /// Bar open and close.
    pub const BAR_PRICE: Range<f64> = 100.0..300.0;
}

fn draw<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> Result<f64> {
    let dist = Uniform::new(range.start, range.end)
        .map_err(|e| MarketError::Range(format!("{:?}: {}", range, e)))?;
    Ok(dist.sample(rng))
}

fn draw_count<R: Rng + ?Sized>(rng: &mut R, range: &Range<u64>) -> Result<u64> {
    let dist = Uniform::new(range.start, range.end)
        .map_err(|e| MarketError::Range(format!("{:?}: {}", range, e)))?;
    Ok(dist.sample(rng))
}

/// Range-bounded uniform generator.
#[derive(Debug, Clone, Default)]
pub struct SyntheticRandomSource {
    mode: GenerationMode,
}

impl SyntheticRandomSource {
    /// Create a generator in the given mode.
    pub fn new(mode: GenerationMode) -> Self {
        Self { mode }
    }

    /// Current generation mode.
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Draw price, change, percent change and trend.
    fn draw_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(f64, f64, f64, Trend)> {
        let price = draw(rng, &ranges::PRICE)?;
        let change = draw(rng, &ranges::CHANGE)?;
        let (percent_change, trend) = match self.mode {
            GenerationMode::Consistent => {
                let magnitude = draw(rng, &(0.0..ranges::PERCENT_CHANGE.end))?;
                let signed = if change > 0.0 { magnitude } else { -magnitude };
                (signed, Trend::from_change(change))
            }
            GenerationMode::Independent => {
                let percent = draw(rng, &ranges::PERCENT_CHANGE)?;
                let trend = if rng.random_bool(0.5) { Trend::Up } else { Trend::Down };
                (percent, trend)
            }
        };
        Ok((price, change, percent_change, trend))
    }

    /// Draw one daily bar for `date`.
    fn draw_bar<R: Rng + ?Sized>(&self, rng: &mut R, date: NaiveDate) -> Result<DailyBar> {
        let open = draw(rng, &ranges::BAR_PRICE)?;
        let mut high = draw(rng, &ranges::HIGH)?;
        let mut low = draw(rng, &ranges::LOW)?;
        let close = draw(rng, &ranges::BAR_PRICE)?;
        let volume = draw_count(rng, &ranges::VOLUME)?;
        if self.mode == GenerationMode::Consistent {
            high = high.max(open).max(close);
            low = low.min(open).min(close);
        }
        Ok(DailyBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Generate a snapshot from `rng` as of `now`.
    ///
    /// The history holds `HISTORY_DAYS` bars, oldest first, the last one dated on
    /// `now`'s UTC day.
    pub fn generate_snapshot<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<StockSnapshot> {
        let (price, change, percent_change, trend) = self.draw_move(rng)?;
        let mut high = draw(rng, &ranges::HIGH)?;
        let mut low = draw(rng, &ranges::LOW)?;
        if self.mode == GenerationMode::Consistent {
            high = high.max(price);
            low = low.min(price);
        }
        let current_data = SessionQuote {
            price,
            change,
            percent_change,
            trend,
            high,
            low,
            volume: draw_count(rng, &ranges::VOLUME)?,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let market_data = ValuationMetrics {
            market_cap: draw_count(rng, &ranges::MARKET_CAP)?,
            pe_ratio: draw(rng, &ranges::PE_RATIO)?,
            dividend_yield: draw(rng, &ranges::DIVIDEND_YIELD)?,
            beta: draw(rng, &ranges::BETA)?,
            week_52_high: draw(rng, &ranges::WEEK_52_HIGH)?,
            week_52_low: draw(rng, &ranges::WEEK_52_LOW)?,
        };

        let technical_indicators = TechnicalIndicators {
            sma_20: draw(rng, &ranges::SMA)?,
            sma_50: draw(rng, &ranges::SMA)?,
            volatility: draw(rng, &ranges::VOLATILITY)?,
            rsi: draw(rng, &ranges::RSI)?,
        };

        let today = now.date_naive();
        let mut historical_data = Vec::with_capacity(HISTORY_DAYS);
        for days_back in (0..HISTORY_DAYS as u64).rev() {
            let date = today
                .checked_sub_days(Days::new(days_back))
                .ok_or_else(|| MarketError::Date(format!("{} minus {} days", today, days_back)))?;
            historical_data.push(self.draw_bar(rng, date)?);
        }

        Ok(StockSnapshot {
            symbol: String::from(symbol),
            company_name: company_name_for(symbol),
            current_data,
            market_data,
            technical_indicators,
            historical_data,
        })
    }
}

impl QuoteSource for SyntheticRandomSource {
    fn name(&self) -> &'static str {
        "synthetic-random"
    }

    fn quote(&self, symbol: &str) -> Result<Quote> {
        let mut rng = rand::rng();
        let (price, change, percent_change, trend) = self.draw_move(&mut rng)?;
        Ok(Quote {
            symbol: String::from(symbol),
            name: company_name_for(symbol),
            price,
            change,
            percent_change,
            trend,
        })
    }

    fn snapshot(&self, symbol: &str) -> Result<StockSnapshot> {
        let mut rng = rand::rng();
        self.generate_snapshot(&mut rng, symbol, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 5).unwrap()
    }

    #[test]
    fn static_source_serves_table_and_rejects_unknown() {
        let source = StaticSource::new(
            "static",
            vec![Quote::new("^VIX", "VIX", 18.45, -1.23, -6.25)],
        );
        assert_eq!(source.quote("^VIX").unwrap().price, 18.45);
        assert!(matches!(source.quote("^FOO"), Err(MarketError::UnknownSymbol(_))));
        assert!(matches!(
            source.snapshot("^VIX"),
            Err(MarketError::Unsupported { .. })
        ));
        assert_eq!(source.symbols(), vec!["^VIX"]);
    }

    #[test]
    fn history_crosses_month_boundary_oldest_first() {
        let source = SyntheticRandomSource::default();
        let mut rng = StdRng::seed_from_u64(7);
        let snapshot = source.generate_snapshot(&mut rng, "MSFT", fixed_now()).unwrap();
        let dates: Vec<NaiveDate> = snapshot.historical_data.iter().map(|b| b.date).collect();
        assert_eq!(dates.len(), HISTORY_DAYS);
        assert_eq!(dates[HISTORY_DAYS - 1], NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert!(dates.windows(2).all(|w| w[1] - w[0] == chrono::Duration::days(1)));
    }

    #[test]
    fn session_date_has_millisecond_precision() {
        let source = SyntheticRandomSource::default();
        let mut rng = StdRng::seed_from_u64(1);
        let snapshot = source.generate_snapshot(&mut rng, "AAPL", fixed_now()).unwrap();
        assert_eq!(snapshot.current_data.date, "2026-03-01T14:30:05.000Z");
        assert_eq!(snapshot.company_name, "Apple Inc.");
    }

    #[test]
    fn consistent_mode_keeps_related_fields_aligned() {
        let source = SyntheticRandomSource::new(GenerationMode::Consistent);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let s = source.generate_snapshot(&mut rng, "TSLA", fixed_now()).unwrap();
            let current = &s.current_data;
            assert_eq!(current.trend, Trend::from_change(current.change));
            assert!(current.change > 0.0 || current.percent_change <= 0.0);
            assert!(current.change <= 0.0 || current.percent_change >= 0.0);
            assert!(current.high >= current.price && current.low <= current.price);
            assert!(s.historical_data.iter().all(DailyBar::is_consistent));
            assert!(ranges::HIGH.contains(&current.high));
            assert!(ranges::LOW.contains(&current.low));
        }
    }

    #[test]
    fn independent_mode_eventually_disagrees() {
        let source = SyntheticRandomSource::new(GenerationMode::Independent);
        let mut rng = StdRng::seed_from_u64(3);
        let mut mismatched_trend = false;
        let mut inconsistent_bar = false;
        for _ in 0..200 {
            let s = source.generate_snapshot(&mut rng, "TSLA", fixed_now()).unwrap();
            mismatched_trend |= s.current_data.trend != Trend::from_change(s.current_data.change);
            inconsistent_bar |= s.historical_data.iter().any(|b| !b.is_consistent());
        }
        assert!(mismatched_trend);
        assert!(inconsistent_bar);
    }

    #[test]
    fn synthetic_quote_uses_company_name() {
        let quote = SyntheticRandomSource::default().quote("NVDA").unwrap();
        assert_eq!(quote.name, "NVDA Corporation");
        assert!(ranges::PRICE.contains(&quote.price));
        assert!(quote.is_consistent());
    }

    #[test]
    fn empty_range_is_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(draw(&mut rng, &(5.0..5.0)), Err(MarketError::Range(_))));
    }
}
