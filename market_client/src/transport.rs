//! Fetching route bodies from the market data server.
//!
//! `Transport` is the only I/O boundary of the dashboard: it turns a route and its
//! query parameters into the raw response body. Non-2xx responses still yield their
//! body so the `{success: false, error}` envelope reaches the caller.
use std::time::Duration;

use log::debug;
use market_common::MarketError;
use market_common::Result;
use market_common::net::url;
use reqwest::blocking::Client;

/// Source of route response bodies.
pub trait Transport: Send + Sync {
    /// GET `route` with `query` and return the body text.
    fn get(&self, route: &str, query: &[(&str, &str)]) -> Result<String>;
}

/// Blocking HTTP transport against a server base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for `base_url` (e.g. `http://127.0.0.1:8080`).
    ///
    /// No request timeout is set unless `timeout` is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: String::from(base_url),
        })
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn get(&self, route: &str, query: &[(&str, &str)]) -> Result<String> {
        let target = url(&self.base_url, route);
        debug!("GET {} {:?}", target, query);
        let response = self
            .client
            .get(&target)
            .query(query)
            .send()
            .map_err(|e| MarketError::Network(e.to_string()))?;
        debug!("{} answered {}", target, response.status());
        response
            .text()
            .map_err(|e| MarketError::Network(e.to_string()))
    }
}
