//! Typed async client for the Enemera energy market-data API.
//!
//! One generic pipeline serves every curve the API exposes: build and
//! validate a query, resolve the curve to its endpoint and record shape,
//! perform a single GET, deserialize the payload strictly into typed
//! records, and optionally materialize a polars `DataFrame` with
//! timezone-aware or naive timestamps.
//!
//! # Example
//!
//! ```rust,no_run
//! use enemera::curves::ItalyPrices;
//! use enemera::{Client, Curve, CurveQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), enemera::Error> {
//!     let client = Client::from_env()?;
//!     let query = CurveQuery::range("2024-01-01", "2024-01-31").market("MGP");
//!
//!     // Typed access
//!     let prices = client.get::<ItalyPrices>(&query).await?;
//!     for record in &prices {
//!         println!("{} {} {:.2}", record.utc, record.zone, record.price);
//!     }
//!
//!     // Tabular access, resolved from a curve identifier at runtime
//!     let curve: Curve = "italy_prices".parse()?;
//!     let frame = client.get_frame(curve, &query, "utc", false).await?;
//!     println!("{frame}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod curves;
pub mod errors;
pub mod io;
pub mod models;
pub mod response;

pub use client::{BASE_URL, Client, ClientBuilder};
pub use curves::Curve;
pub use errors::Error;
pub use models::request_params::{CurveQuery, DateInput};
pub use response::ApiResponse;
