//! Command-line and environment configuration for the market data server.
//!
//! Every flag also reads an environment variable; a `.env` file in the working
//! directory is loaded first.
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use market_common::net::{HTTP_PORT, addr};

use crate::model::quote_source::GenerationMode;

/// Parsed server configuration.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address and port the HTTP server binds to.
    #[clap(long, env = "MARKET_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Comma-separated CORS origins, `*` for any.
    #[clap(
        long,
        env = "MARKET_CORS_ALLOW_ORIGINS",
        default_value = "*",
        value_delimiter = ','
    )]
    pub cors_allow: Vec<String>,

    /// Optional search catalog file with `SYMBOL|Name|EXCHANGE|type` lines.
    #[clap(long, env = "MARKET_CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    /// How related random fields of a snapshot relate to each other.
    #[clap(long, env = "MARKET_GENERATION", value_enum, default_value_t = GenerationMode::Consistent)]
    pub generation: GenerationMode,
}

impl Config {
    /// Loads `.env` if present, then parses flags and environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], HTTP_PORT)),
            cors_allow: vec![String::from("*")],
            catalog: None,
            generation: GenerationMode::default(),
        }
    }
}

/// Loopback address on `port`, handy for local runs and tests.
pub fn loopback(port: u16) -> String {
    addr("127.0.0.1", port)
}
