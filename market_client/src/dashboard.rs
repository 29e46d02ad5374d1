//! Dashboard orchestration.
//!
//! `Dashboard` issues fetches against the server routes and folds the responses into
//! `DashboardState`. All operations take `&self`, so a dashboard shared between
//! threads can run several fetches at once; the ticket check in `FetchSlot` makes the
//! last-issued fetch of each slot win regardless of completion order.
use std::sync::{Mutex, MutexGuard};
use std::thread;

use log::{error, info};
use market_common::MarketError;
use market_common::Result;
use market_common::api::{self, MarketOverview, SearchResults, TickerTape};
use market_common::catalog::{SearchCatalogEntry, TypeFilter};
use market_common::net::{MARKET_OVERVIEW_ROUTE, STOCK_DATA_ROUTE, STOCK_SEARCH_ROUTE, TICKER_ROUTE};
use market_common::snapshot::StockSnapshot;
use serde::de::DeserializeOwned;

use crate::state::{DEFAULT_SYMBOL, DashboardState, FetchSlot};
use crate::transport::Transport;

/// Shown when a request never produced a readable response.
pub const NETWORK_ERROR: &str = "Network error. Please try again.";
/// Period sent with stock data requests.
pub const STOCK_PERIOD: &str = "3mo";

/// Message shown to the user for a failed fetch.
fn user_message(err: &MarketError) -> String {
    match err {
        MarketError::Provider(message) => message.clone(),
        MarketError::Network(_) | MarketError::SerdeJson(_) => String::from(NETWORK_ERROR),
        other => other.to_string(),
    }
}

/// Fetch orchestrator over a transport.
pub struct Dashboard<T: Transport> {
    transport: T,
    state: Mutex<DashboardState>,
}

impl<T: Transport> Dashboard<T> {
    /// Creates an idle dashboard.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(DashboardState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DashboardState>> {
        Ok(self.state.lock()?)
    }

    /// Copy of the current state.
    pub fn state(&self) -> Result<DashboardState> {
        Ok(self.lock()?.clone())
    }

    /// Runs one fetch against `route` and applies it to the slot chosen by `slot`.
    ///
    /// The mutex is released while the request is in flight.
    fn fetch_into<P, D>(
        &self,
        route: &str,
        query: &[(&str, &str)],
        fallback: &str,
        slot: fn(&mut DashboardState) -> &mut FetchSlot<D>,
        extract: fn(P) -> D,
    ) -> Result<bool>
    where
        P: DeserializeOwned,
    {
        let ticket = slot(&mut *self.lock()?).begin();
        let result = self
            .transport
            .get(route, query)
            .and_then(|body| api::decode::<P>(&body, fallback))
            .map(extract)
            .map_err(|e| {
                error!("Error fetching {}: {}", route, e);
                user_message(&e)
            });
        let mut state = self.lock()?;
        Ok(slot(&mut state).complete(ticket, result))
    }

    /// Loads the market overview, the default symbol and the ticker tape in parallel.
    pub fn mount(&self) -> Result<()> {
        info!("Mounting dashboard");
        thread::scope(|scope| {
            let overview = scope.spawn(|| self.fetch_market_overview());
            let ticker = scope.spawn(|| self.refresh_ticker());
            self.fetch_stock_data(DEFAULT_SYMBOL)?;
            for handle in [overview, ticker] {
                handle
                    .join()
                    .map_err(|_| MarketError::Format(String::from("fetch thread panicked")))??;
            }
            Ok(())
        })
    }

    /// Refreshes the market index cards.
    pub fn fetch_market_overview(&self) -> Result<bool> {
        self.fetch_into(
            MARKET_OVERVIEW_ROUTE,
            &[],
            "Failed to fetch market data",
            |s| &mut s.overview,
            |p: MarketOverview| p.market_data,
        )
    }

    /// Replaces the displayed snapshot with a fresh one for `symbol`.
    pub fn fetch_stock_data(&self, symbol: &str) -> Result<bool> {
        self.lock()?.show_search = false;
        self.fetch_into(
            STOCK_DATA_ROUTE,
            &[("symbol", symbol), ("period", STOCK_PERIOD)],
            "Failed to fetch stock data",
            |s| &mut s.stock,
            |p: StockSnapshot| p,
        )
    }

    /// Picks a symbol from the search dropdown or the popular list.
    pub fn select_stock(&self, symbol: &str) -> Result<bool> {
        {
            let mut state = self.lock()?;
            state.search_query.clear();
            state.search.clear();
            state.show_search = false;
        }
        info!("Selected {}", symbol);
        self.fetch_stock_data(symbol)
    }

    /// Handles a keystroke in the search box: every change queries the server.
    ///
    /// An empty query clears the results and discards any search still in flight.
    pub fn search_input(&self, query: &str) -> Result<bool> {
        {
            let mut state = self.lock()?;
            state.search_query = String::from(query);
            state.show_search = true;
            if query.is_empty() {
                state.search.clear();
                return Ok(false);
            }
        }
        self.fetch_into(
            STOCK_SEARCH_ROUTE,
            &[("q", query)],
            "Failed to search stocks",
            |s| &mut s.search,
            |p: SearchResults| p.results,
        )
    }

    /// Sets the instrument type toggle.
    pub fn set_filter(&self, filter: TypeFilter) -> Result<()> {
        self.lock()?.filter = filter;
        Ok(())
    }

    /// Search results passing the toggle, at most five.
    pub fn visible_results(&self) -> Result<Vec<SearchCatalogEntry>> {
        Ok(self.lock()?.visible_results())
    }

    /// Refreshes the ticker tape.
    pub fn refresh_ticker(&self) -> Result<bool> {
        self.fetch_into(
            TICKER_ROUTE,
            &[],
            "Failed to fetch ticker data",
            |s| &mut s.ticker,
            |p: TickerTape| p.tickers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FetchStatus;
    use crossbeam_channel::{Receiver, Sender, unbounded};
    use market_common::catalog::default_catalog;
    use std::collections::HashMap;
    use std::sync::Arc;

    const SNAPSHOT_TEMPLATE: &str = r#"{
        "success": true, "symbol": "SYM", "company_name": "SYM Corporation",
        "current_data": {"price": 150.0, "change": 1.0, "percent_change": 0.5, "trend": "up",
                         "high": 160.0, "low": 140.0, "volume": 1000, "date": "2026-10-18T00:00:00.000Z"},
        "market_data": {"market_cap": 1, "pe_ratio": 20.0, "dividend_yield": 1.0, "beta": 1.0,
                        "52_week_high": 200.0, "52_week_low": 100.0},
        "technical_indicators": {"sma_20": 150.0, "sma_50": 150.0, "volatility": 20.0, "rsi": 50.0},
        "historical_data": []
    }"#;

    fn snapshot_body(symbol: &str) -> String {
        SNAPSHOT_TEMPLATE.replace("SYM", symbol)
    }

    fn search_body(query: &str) -> String {
        let results: Vec<_> = default_catalog()
            .into_iter()
            .filter(|e| e.matches(query))
            .collect();
        serde_json::json!({"success": true, "results": results}).to_string()
    }

    /// Canned responses keyed by route; routes in `unreachable` fail at the network level.
    struct StubTransport {
        unreachable: Vec<&'static str>,
    }

    impl StubTransport {
        fn healthy() -> Self {
            Self {
                unreachable: Vec::new(),
            }
        }
    }

    impl Transport for StubTransport {
        fn get(&self, route: &str, query: &[(&str, &str)]) -> Result<String> {
            if self.unreachable.iter().any(|r| *r == route) {
                return Err(MarketError::Network(String::from("connection refused")));
            }
            let param = |name: &str| {
                query
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| *v)
                    .unwrap_or_default()
            };
            Ok(match route {
                MARKET_OVERVIEW_ROUTE => serde_json::json!({
                    "success": true,
                    "market_data": [
                        {"symbol": "^GSPC", "name": "S&P 500", "price": 4567.89, "change": 12.45, "percent_change": 0.27, "trend": "up"},
                        {"symbol": "^DJI", "name": "Dow Jones", "price": 34567.12, "change": -45.67, "percent_change": -0.13, "trend": "down"},
                        {"symbol": "^IXIC", "name": "NASDAQ", "price": 14234.56, "change": 89.34, "percent_change": 0.63, "trend": "up"},
                        {"symbol": "^VIX", "name": "VIX", "price": 18.45, "change": -1.23, "percent_change": -6.25, "trend": "down"}
                    ]
                })
                .to_string(),
                STOCK_DATA_ROUTE => match param("symbol") {
                    "FAIL" => String::from(r#"{"success":false,"error":"Failed to fetch data"}"#),
                    "SILENT" => String::from(r#"{"success":false}"#),
                    symbol => snapshot_body(symbol),
                },
                STOCK_SEARCH_ROUTE => search_body(param("q")),
                TICKER_ROUTE => String::from(
                    r#"{"success":true,"tickers":[{"symbol":"AAPL","company_name":"Apple","price":175.43,"change":2.15,"percent_change":1.24}]}"#,
                ),
                _ => String::from(r#"{"success":false,"error":"Endpoint not found"}"#),
            })
        }
    }

    #[test]
    fn mount_loads_overview_default_symbol_and_ticker() {
        let dashboard = Dashboard::new(StubTransport::healthy());
        dashboard.mount().unwrap();
        let state = dashboard.state().unwrap();
        assert_eq!(state.overview.data().unwrap().len(), 4);
        assert_eq!(state.stock.data().unwrap().symbol, "AAPL");
        assert_eq!(state.ticker.data().unwrap().len(), 1);
        assert_eq!(state.selected_symbol(), "AAPL");
    }

    #[test]
    fn provider_failure_surfaces_message_and_keeps_snapshot() {
        let dashboard = Dashboard::new(StubTransport::healthy());
        dashboard.fetch_stock_data("MSFT").unwrap();
        dashboard.select_stock("FAIL").unwrap();
        let state = dashboard.state().unwrap();
        assert_eq!(state.stock.status(), FetchStatus::Failed);
        assert_eq!(state.stock.error(), Some("Failed to fetch data"));
        assert_eq!(state.selected_symbol(), "MSFT");

        dashboard.select_stock("SILENT").unwrap();
        let state = dashboard.state().unwrap();
        assert_eq!(state.stock.error(), Some("Failed to fetch stock data"));
    }

    #[test]
    fn network_failure_uses_generic_message_and_spares_other_slots() {
        let mut transport = StubTransport::healthy();
        transport.unreachable.push(STOCK_DATA_ROUTE);
        let dashboard = Dashboard::new(transport);
        dashboard.mount().unwrap();
        let state = dashboard.state().unwrap();
        assert_eq!(state.stock.error(), Some(NETWORK_ERROR));
        assert!(state.stock.data().is_none());
        assert_eq!(state.overview.status(), FetchStatus::Ready);
    }

    #[test]
    fn search_as_you_type_and_clear() {
        let dashboard = Dashboard::new(StubTransport::healthy());
        dashboard.search_input("a").unwrap();
        assert!(dashboard.state().unwrap().show_search);
        assert_eq!(dashboard.visible_results().unwrap().len(), 5);

        dashboard.search_input("aapl").unwrap();
        let visible = dashboard.visible_results().unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "AAPL");

        dashboard.set_filter(TypeFilter::Etf).unwrap();
        assert!(dashboard.visible_results().unwrap().is_empty());
        dashboard.set_filter(TypeFilter::All).unwrap();

        dashboard.search_input("").unwrap();
        let state = dashboard.state().unwrap();
        assert!(state.search.data().is_none());
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn selecting_closes_search_and_replaces_snapshot() {
        let dashboard = Dashboard::new(StubTransport::healthy());
        dashboard.search_input("tes").unwrap();
        dashboard.select_stock("TSLA").unwrap();
        let state = dashboard.state().unwrap();
        assert!(!state.show_search);
        assert!(state.search_query.is_empty());
        assert!(state.search.data().is_none());
        assert_eq!(state.selected_symbol(), "TSLA");
        assert_eq!(state.stock.data().unwrap().company_name, "TSLA Corporation");
    }

    /// Stock data requests block until released, one gate per symbol.
    struct GatedTransport {
        started: Sender<String>,
        gates: HashMap<&'static str, Receiver<()>>,
    }

    impl Transport for GatedTransport {
        fn get(&self, route: &str, query: &[(&str, &str)]) -> Result<String> {
            assert_eq!(route, STOCK_DATA_ROUTE);
            let symbol = query[0].1;
            self.started
                .send(String::from(symbol))
                .map_err(|e| MarketError::Format(e.to_string()))?;
            self.gates[symbol]
                .recv()
                .map_err(|e| MarketError::Format(e.to_string()))?;
            Ok(snapshot_body(symbol))
        }
    }

    #[test]
    fn last_issued_selection_wins_over_slower_earlier_one() {
        let (started_tx, started_rx) = unbounded();
        let (msft_tx, msft_rx) = unbounded();
        let (tsla_tx, tsla_rx) = unbounded();
        let dashboard = Arc::new(Dashboard::new(GatedTransport {
            started: started_tx,
            gates: HashMap::from([("MSFT", msft_rx), ("TSLA", tsla_rx)]),
        }));

        let first = {
            let dashboard = Arc::clone(&dashboard);
            thread::spawn(move || dashboard.select_stock("MSFT").unwrap())
        };
        assert_eq!(started_rx.recv().unwrap(), "MSFT");
        let second = {
            let dashboard = Arc::clone(&dashboard);
            thread::spawn(move || dashboard.select_stock("TSLA").unwrap())
        };
        assert_eq!(started_rx.recv().unwrap(), "TSLA");

        tsla_tx.send(()).unwrap();
        assert!(second.join().unwrap());
        assert!(dashboard.state().unwrap().stock.data().is_some());

        msft_tx.send(()).unwrap();
        assert!(!first.join().unwrap());

        let state = dashboard.state().unwrap();
        assert_eq!(state.selected_symbol(), "TSLA");
        assert_eq!(state.stock.status(), FetchStatus::Ready);
    }
}
