//! Dashboard client for the market data server.
//!
//! `Dashboard` drives fetches over a `Transport` and keeps the result in
//! `DashboardState`; `render` turns that state into displayable lines and chart series.
#![warn(missing_docs)]
pub mod args;
pub mod dashboard;
pub mod render;
pub mod state;
pub mod transport;

pub use dashboard::Dashboard;
pub use transport::{HttpTransport, Transport};
