//! Text rendering of the dashboard state.
//!
//! Views are plain lines so the binary can log them; chart series are returned as
//! label/value pairs for whatever draws them.

use market_common::catalog::SearchCatalogEntry;
use market_common::logo::{Logo, LogoResolver};
use market_common::quote::{MarketIndex, TickerQuote, Trend};
use market_common::snapshot::{DailyBar, StockSnapshot};

use crate::state::DashboardState;

/// Bars shown on the price chart.
pub const PRICE_CHART_DAYS: usize = 30;
/// Bars shown on the volume chart.
pub const VOLUME_CHART_DAYS: usize = 15;
/// The popular-symbols quick picks.
pub const POPULAR_SYMBOLS: [&str; 6] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "META"];

/// RSI reading band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    /// Above 70.
    Overbought,
    /// Below 30.
    Oversold,
    /// Anything in between.
    Neutral,
}

impl RsiZone {
    /// Band of an RSI value.
    pub fn of(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiZone::Overbought
        } else if rsi < 30.0 {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

/// One chart dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// X-axis labels like `Oct 18`.
    pub labels: Vec<String>,
    /// Y values.
    pub values: Vec<f64>,
}

fn tail(bars: &[DailyBar], n: usize) -> &[DailyBar] {
    &bars[bars.len().saturating_sub(n)..]
}

fn chart(bars: &[DailyBar], value: fn(&DailyBar) -> f64) -> ChartSeries {
    ChartSeries {
        labels: bars.iter().map(|b| b.date.format("%b %-d").to_string()).collect(),
        values: bars.iter().map(value).collect(),
    }
}

/// Closing prices of the last `PRICE_CHART_DAYS` bars.
pub fn price_series(snapshot: &StockSnapshot) -> ChartSeries {
    chart(tail(&snapshot.historical_data, PRICE_CHART_DAYS), |b| b.close)
}

/// Volumes of the last `VOLUME_CHART_DAYS` bars.
pub fn volume_series(snapshot: &StockSnapshot) -> ChartSeries {
    chart(tail(&snapshot.historical_data, VOLUME_CHART_DAYS), |b| {
        b.volume as f64
    })
}

/// `+1.23` / `-1.23`.
pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Volume in millions with one decimal, e.g. `75.0M`.
pub fn millions(volume: u64) -> String {
    format!("{:.1}M", volume as f64 / 1_000_000.0)
}

fn arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↗",
        Trend::Down => "↘",
    }
}

/// One line per index card.
pub fn market_cards(indices: &[MarketIndex]) -> Vec<String> {
    indices
        .iter()
        .map(|index| {
            format!(
                "{} ({})  {:.2}  {} ({:.2}%) {}",
                index.name,
                index.symbol,
                index.price,
                signed(index.change),
                index.percent_change,
                arrow(index.trend)
            )
        })
        .collect()
}

/// Header, key stats and technical panel of a snapshot.
pub fn snapshot_view(snapshot: &StockSnapshot) -> Vec<String> {
    let current = &snapshot.current_data;
    let technical = &snapshot.technical_indicators;
    let zone = match RsiZone::of(technical.rsi) {
        RsiZone::Overbought => " overbought",
        RsiZone::Oversold => " oversold",
        RsiZone::Neutral => "",
    };
    vec![
        format!("{} | {}", snapshot.symbol, snapshot.company_name),
        format!(
            "${:.2}  {} {} ({:.2}%)",
            current.price,
            arrow(current.trend),
            signed(current.change),
            current.percent_change
        ),
        format!(
            "High ${:.2}  Low ${:.2}  Volume {}  P/E {:.2}",
            current.high,
            current.low,
            millions(current.volume),
            snapshot.market_data.pe_ratio
        ),
        format!(
            "RSI (14) {:.1}{}  SMA 20 ${:.2}  Volatility {:.1}%",
            technical.rsi, zone, technical.sma_20, technical.volatility
        ),
    ]
}

fn logo_tag(logo: &Logo) -> &str {
    match logo {
        Logo::Remote(url) => url,
        Logo::SpecialCaseSvg(_) => "[logo]",
        Logo::Placeholder(_) => "[initial]",
    }
}

/// Dropdown rows for the visible search results.
pub fn search_dropdown(results: &[SearchCatalogEntry], logos: &LogoResolver) -> Vec<String> {
    results
        .iter()
        .map(|entry| {
            format!(
                "{} {}  {} ({})",
                logo_tag(&logos.resolve(&entry.symbol)),
                entry.symbol,
                entry.name,
                entry.exchange
            )
        })
        .collect()
}

/// Popular symbols with the selected one bracketed.
pub fn popular_line(selected: &str) -> String {
    POPULAR_SYMBOLS
        .iter()
        .map(|s| {
            if *s == selected {
                format!("[{}]", s)
            } else {
                String::from(*s)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The ticker tape on one line.
pub fn ticker_line(tape: &[TickerQuote]) -> String {
    tape.iter()
        .map(|t| {
            let sign = if t.change >= 0.0 { "+" } else { "" };
            format!(
                "{} {} ${:.2} {}{:.2} ({:.2}%)",
                t.symbol, t.company_name, t.price, sign, t.change, t.percent_change
            )
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

/// Whole dashboard.
pub fn dashboard_view(state: &DashboardState, logos: &LogoResolver) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(tape) = state.ticker.data() {
        lines.push(ticker_line(tape));
    }
    if let Some(indices) = state.overview.data() {
        lines.extend(market_cards(indices));
    }
    if state.show_search {
        let visible = state.visible_results();
        if !visible.is_empty() {
            lines.push(format!("Search {:?} ({}):", state.search_query, state.filter));
            lines.extend(search_dropdown(&visible, logos));
        }
    }
    lines.push(popular_line(state.selected_symbol()));
    if let Some(error) = state.stock.error() {
        lines.push(format!("Error: {}", error));
    }
    if state.stock.is_loading() {
        lines.push(String::from("Loading..."));
    }
    if let Some(snapshot) = state.stock.data() {
        lines.extend(snapshot_view(snapshot));
        let closes = price_series(snapshot);
        if let (Some(first), Some(last)) = (closes.labels.first(), closes.labels.last()) {
            lines.push(format!("Close prices {} .. {} ({} days)", first, last, closes.values.len()));
        }
    }
    lines
}
