//! Errors raised while talking to the warehouse.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("connection parameter '{0}' is not configured")]
    MissingParameter(&'static str),
    #[error("invalid warehouse url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("warehouse request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{code}: {message}")]
    Warehouse { code: String, message: String },
    #[error("unexpected response from the warehouse: {0}")]
    UnexpectedResponse(String),
    #[error("unsupported result format '{0}'")]
    UnsupportedResultFormat(String),
}
