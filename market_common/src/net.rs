//! Shared networking constants and helpers used by server and client.

/// Default HTTP port of the market data server.
pub const HTTP_PORT: u16 = 8080;

/// Market index cards.
pub const MARKET_OVERVIEW_ROUTE: &str = "/api/market-overview";
/// Per-symbol snapshot.
pub const STOCK_DATA_ROUTE: &str = "/api/stock-data";
/// Catalog search.
pub const STOCK_SEARCH_ROUTE: &str = "/api/stock-search";
/// Scrolling ticker tape.
pub const TICKER_ROUTE: &str = "/api/ticker";
/// Liveness probe.
pub const HEALTH_ROUTE: &str = "/api/health";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Joins a base URL and a route without doubling or dropping the slash.
pub fn url(base: &str, route: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        assert_eq!(
            url("http://127.0.0.1:8080/", STOCK_DATA_ROUTE),
            "http://127.0.0.1:8080/api/stock-data"
        );
        assert_eq!(url("http://h", "api/x"), "http://h/api/x");
    }

    #[test]
    fn addr_formats_ip_and_port() {
        assert_eq!(addr("0.0.0.0", HTTP_PORT), "0.0.0.0:8080");
    }
}
