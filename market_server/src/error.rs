//! HTTP error mapping.
//!
//! Each route reports its own fixed message; the underlying `MarketError` is logged
//! and never sent to the caller.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use market_common::MarketError;
use market_common::api::ErrorResponse;
use thiserror::Error;

/// Route-level failure.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The market overview could not be built.
    #[error("Failed to fetch market data")]
    MarketOverview(#[source] MarketError),

    /// The stock snapshot could not be built.
    #[error("Failed to fetch data")]
    StockData(#[source] MarketError),

    /// The search catalog could not be read.
    #[error("Failed to search stocks")]
    Search(#[source] MarketError),

    /// The ticker tape could not be built.
    #[error("Failed to fetch ticker data")]
    Ticker(#[source] MarketError),

    /// No route matched the request path.
    #[error("Endpoint not found")]
    NotFound,
}

impl ApiError {
    /// Status code sent for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::MarketOverview(e)
            | ApiError::StockData(e)
            | ApiError::Search(e)
            | ApiError::Ticker(e) => {
                error!("{}: {}", self, e);
            }
            ApiError::NotFound => {}
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;
