//! Dashboard UI state.
//!
//! Each independently fetched piece of data lives in its own `FetchSlot`. A slot moves
//! `Idle -> Loading -> Ready | Failed` and can be re-entered at any time. Every fetch
//! takes a `Ticket` when it starts; on completion the result is applied only if that
//! ticket is still the latest one issued for the slot, so a slow stale response can
//! never overwrite a newer one.

use log::debug;
use market_common::catalog::{SearchCatalogEntry, TypeFilter};
use market_common::quote::{MarketIndex, TickerQuote};
use market_common::snapshot::StockSnapshot;

/// Symbol fetched when the dashboard mounts.
pub const DEFAULT_SYMBOL: &str = "AAPL";
/// Maximum number of search results shown in the dropdown.
pub const VISIBLE_RESULTS: usize = 5;

/// Sequence number of one fetch on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Phase of a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing requested yet, or the last request was invalidated.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Ready,
    /// The latest request failed.
    Failed,
}

/// Last received payload of one kind plus its fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    data: Option<T>,
    status: FetchStatus,
    error: Option<String>,
    latest: u64,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: FetchStatus::Idle,
            error: None,
            latest: 0,
        }
    }
}

impl<T> FetchSlot<T> {
    /// Starts a fetch: marks the slot loading and issues a fresh ticket.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.status = FetchStatus::Loading;
        self.error = None;
        Ticket(self.latest)
    }

    /// Applies `result` if `ticket` is the latest issued. Returns whether it was applied.
    ///
    /// A failure keeps the previously received data.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if ticket.0 != self.latest {
            debug!(
                "Discarding stale response #{} (latest #{})",
                ticket.0, self.latest
            );
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = FetchStatus::Ready;
                self.error = None;
            }
            Err(message) => {
                self.status = FetchStatus::Failed;
                self.error = Some(message);
            }
        }
        true
    }

    /// Drops the data and makes every in-flight ticket stale.
    pub fn clear(&mut self) {
        self.latest += 1;
        self.data = None;
        self.status = FetchStatus::Idle;
        self.error = None;
    }

    /// Last successfully received payload.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Current phase.
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Message of the latest failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Market index cards.
    pub overview: FetchSlot<Vec<MarketIndex>>,
    /// Selected stock.
    pub stock: FetchSlot<StockSnapshot>,
    /// Results of the latest search.
    pub search: FetchSlot<Vec<SearchCatalogEntry>>,
    /// Ticker tape.
    pub ticker: FetchSlot<Vec<TickerQuote>>,
    /// Text currently in the search box.
    pub search_query: String,
    /// Whether the search dropdown is open.
    pub show_search: bool,
    /// Instrument type toggle.
    pub filter: TypeFilter,
}

impl DashboardState {
    /// Symbol of the displayed snapshot, `DEFAULT_SYMBOL` before the first one arrives.
    pub fn selected_symbol(&self) -> &str {
        self.stock
            .data()
            .map(|s| s.symbol.as_str())
            .unwrap_or(DEFAULT_SYMBOL)
    }

    /// Search results passing the type filter, capped to `VISIBLE_RESULTS`.
    pub fn visible_results(&self) -> Vec<SearchCatalogEntry> {
        self.search
            .data()
            .map(|results| {
                results
                    .iter()
                    .filter(|entry| self.filter.admits(entry))
                    .take(VISIBLE_RESULTS)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
