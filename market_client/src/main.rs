//! Market dashboard client: loads the market overview, the selected stock and the
//! ticker tape from the server, logs the rendered dashboard, then keeps refreshing the
//! ticker tape until Ctrl+C.
//!
//! Usage example (CLI):
//! ```bash
//! market_client --server-url http://127.0.0.1:8080 --symbol MSFT --search micro
//! ```
#![warn(missing_docs)]
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{bounded, select, tick};
use log::{info, warn};
use market_client::args::Args;
use market_client::render::{dashboard_view, ticker_line};
use market_client::state::DEFAULT_SYMBOL;
use market_client::{Dashboard, HttpTransport, Transport};
use market_common::MarketError;
use market_common::Result;
use market_common::logo::LogoResolver;

fn main() -> Result<(), MarketError> {
    init_logger();
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down client...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| MarketError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    let transport = HttpTransport::new(args.server_url.trim(), None)?;
    info!("Connecting to {}", transport.base_url());
    let logos = LogoResolver::from_token(args.logo_token.as_deref());
    let dashboard = Dashboard::new(transport);

    dashboard.mount()?;
    if args.symbol != DEFAULT_SYMBOL {
        dashboard.select_stock(&args.symbol)?;
    }
    dashboard.set_filter(args.filter)?;
    if let Some(query) = &args.search {
        dashboard.search_input(query)?;
    }
    show(&dashboard, &logos)?;

    if args.once {
        return Ok(());
    }

    let ticker = tick(Duration::from_secs(args.poll_secs.max(1)));
    loop {
        select! {
            recv(ticker) -> _ => {
                dashboard.refresh_ticker()?;
                let state = dashboard.state()?;
                match (state.ticker.data(), state.ticker.error()) {
                    (_, Some(error)) => warn!("Ticker: {}", error),
                    (Some(tape), None) => info!("{}", ticker_line(tape)),
                    (None, None) => {}
                }
            }
            recv(shutdown_rx) -> _ => break,
        }
    }
    info!("Client stopped");
    Ok(())
}

fn show<T: Transport>(dashboard: &Dashboard<T>, logos: &LogoResolver) -> Result<()> {
    for line in dashboard_view(&dashboard.state()?, logos) {
        info!("{}", line);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
