//! Error types shared between server and client.
//!
//! The `MarketError` enum unifies common failure cases for I/O, serialization,
//! data generation, transport and internal logic, allowing crates to propagate a
//! single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by server and client.
#[derive(Error, Debug)]
pub enum MarketError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a search catalog file into catalog entries.
    #[error("Parse catalog file error: {0}")]
    ParseCatalog(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A sampling range could not be built (empty or non-finite bounds).
    #[error("Invalid generation range: {0}")]
    Range(String),

    /// Calendar arithmetic left the representable date range.
    #[error("Date out of range: {0}")]
    Date(String),

    /// A quote source has no entry for the requested symbol.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A quote source cannot serve the requested kind of data.
    #[error("Unsupported by source {source_name}: {what}")]
    Unsupported {
        /// Name of the quote source.
        source_name: &'static str,
        /// What was asked for.
        what: String,
    },

    /// The HTTP request never produced a response (connection refused, timeout, bad body).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with `success: false`; contains the reported message.
    #[error("{0}")]
    Provider(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for MarketError {
    fn from(err: PoisonError<T>) -> Self {
        MarketError::MutexLock(err.to_string())
    }
}
