//! Command-line arguments for the dashboard client.
//!
//! Every flag can also come from the environment (or a `.env` file). See `main` for
//! end-to-end usage.
use clap::Parser;
use market_common::catalog::TypeFilter;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the market data server.
    #[clap(long, env = "MARKET_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    pub server_url: String,

    /// Symbol to select after the dashboard has loaded.
    #[clap(long, default_value = "AAPL")]
    pub symbol: String,

    /// Text typed into the search box.
    #[clap(long)]
    pub search: Option<String>,

    /// Instrument type toggle applied to search results.
    #[clap(long, value_enum, default_value_t = TypeFilter::All)]
    pub filter: TypeFilter,

    /// Seconds between ticker tape refreshes.
    #[clap(long, default_value_t = 60)]
    pub poll_secs: u64,

    /// Access token for the remote logo service; placeholders are drawn without one.
    #[clap(long, env = "LOGO_DEV_TOKEN")]
    pub logo_token: Option<String>,

    /// Render once and exit instead of polling the ticker.
    #[clap(long)]
    pub once: bool,
}
