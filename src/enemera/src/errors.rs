use shared_utils::env::MissingEnvVarError;
use thiserror::Error;

use crate::curves::Curve;

/// The unified error type for the `enemera` crate.
///
/// Every failure aborts the call that produced it; there is no partial
/// success and no local recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// A date parameter that does not parse as a strict `YYYY-MM-DD`
    /// calendar date.
    #[error("Invalid date for '{field}': '{value}'. Expected 'YYYY-MM-DD', a date, or a datetime")]
    Validation { field: &'static str, value: String },

    /// `date_to` earlier than `date_from`.
    #[error("Invalid date range: date_to ({date_to}) cannot be before date_from ({date_from})")]
    InvalidDateRange { date_from: String, date_to: String },

    /// A curve identifier with no registry entry.
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// A query missing a parameter the curve requires.
    #[error("Curve '{curve}' requires the '{param}' parameter")]
    MissingParameter { curve: Curve, param: &'static str },

    /// An error related to client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API rejected the credentials.
    #[error("Authentication failed (status {status}). Check your API key")]
    Authentication { status: u16 },

    /// The API returned a non-success response.
    #[error("API error {status}: {detail}{}", .request_id.as_ref().map(|id| format!(" (request id: {id})")).unwrap_or_default())]
    Api {
        status: u16,
        detail: String,
        request_id: Option<String>,
    },

    /// Network-level failure at the transport boundary.
    #[error("Connection to API failed")]
    Connection(#[from] reqwest::Error),

    /// The transport deadline elapsed before the response resolved.
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The payload does not match the curve's record shape.
    #[error("Malformed response payload{}: {detail}", .index.map(|i| format!(" at record {i}")).unwrap_or_default())]
    Deserialize { index: Option<usize>, detail: String },

    /// An error from the Polars library.
    #[error("Polars operation failed")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required environment variable is missing.
    #[error(transparent)]
    Env(#[from] MissingEnvVarError),
}
