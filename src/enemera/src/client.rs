//! HTTP transport and the generic curve dispatch.

use std::time::Duration;

use chrono_tz::Tz;
use polars::prelude::DataFrame;
use reqwest::{StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{get_env_var, get_env_var_or};
use tracing::{debug, warn};

use crate::curves::{
    Curve, CurveSpec, ItalyAncillaryServices, ItalyCommercialFlowLimits, ItalyCommercialFlows,
    ItalyDamDemandAct, ItalyDamDemandFcs, ItalyExchangeVolumes, ItalyGeneration,
    ItalyGenerationForecast, ItalyImbalanceData, ItalyLoadActual, ItalyLoadForecast, ItalyPrices,
    ItalyXbidResults, SpainPrices, SpainXbidResults,
};
use crate::errors::Error;
use crate::models::request_params::CurveQuery;
use crate::response::{ApiResponse, parse_records};

/// Default production endpoint.
pub const BASE_URL: &str = "https://api.enemera.com";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "ENEMERA_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "ENEMERA_BASE_URL";

/// Client for the Enemera market-data API.
///
/// Holds one `reqwest::Client` with the bearer token attached as a default
/// header at construction; repeated calls from the same instance reuse its
/// connection pool. The configuration is immutable after [`build`]
/// (`ClientBuilder::build`). Sequential reuse is the supported model; for
/// concurrent callers, clone or construct one client per task.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    _api_key: SecretString,
}

impl Client {
    /// Creates a client for the production API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Creates a client from the environment.
    ///
    /// Reads the key from `ENEMERA_API_KEY` and honors an optional
    /// `ENEMERA_BASE_URL` override.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = get_env_var(API_KEY_ENV_VAR)?;
        let base_url = get_env_var_or(BASE_URL_ENV_VAR, BASE_URL);
        Self::builder(&api_key).base_url(base_url).build()
    }

    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one curve, typed.
    ///
    /// Validates and normalizes the query, resolves the endpoint from the
    /// curve registry, performs a single GET, and deserializes the payload
    /// strictly into the curve's record shape. Every failure aborts the
    /// call; there is no retry and no partial result.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use enemera::{Client, CurveQuery};
    /// # use enemera::curves::ItalyPrices;
    /// # async fn run() -> Result<(), enemera::Error> {
    /// let client = Client::from_env()?;
    /// let query = CurveQuery::range("2024-01-01", "2024-01-31").market("MGP");
    /// let prices = client.get::<ItalyPrices>(&query).await?;
    /// println!("{} records", prices.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<C: CurveSpec>(&self, query: &CurveQuery) -> Result<ApiResponse<C::Record>, Error> {
        let curve = C::CURVE;
        let params = query.build()?;
        for &param in curve.required_params() {
            if !query.has_param(param) {
                return Err(Error::MissingParameter { curve, param });
            }
        }

        let url = format!("{}{}", self.base_url, curve.endpoint());
        debug!(curve = %curve, params = params.len(), "requesting curve data");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let payload = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        Ok(ApiResponse::new(parse_records(&payload)?))
    }

    /// Fetches one curve as a polars `DataFrame`, resolved dynamically.
    ///
    /// `index_col` is promoted to the first column; `naive_datetime`
    /// strips timezone information while keeping UTC wall-clock values.
    pub async fn get_frame(
        &self,
        curve: Curve,
        query: &CurveQuery,
        index_col: &str,
        naive_datetime: bool,
    ) -> Result<DataFrame, Error> {
        self.frame(curve, query, index_col, None, naive_datetime).await
    }

    /// As [`get_frame`](Self::get_frame), converting timestamps into
    /// `zone` first (indexed on `utc`).
    pub async fn get_frame_in_zone(
        &self,
        curve: Curve,
        query: &CurveQuery,
        zone: Tz,
        naive_datetime: bool,
    ) -> Result<DataFrame, Error> {
        self.frame(curve, query, "utc", Some(zone), naive_datetime).await
    }

    /// Frame with timestamps in the Central European zone, the common
    /// representation for the Italian market.
    pub async fn get_frame_cet(
        &self,
        curve: Curve,
        query: &CurveQuery,
        naive_datetime: bool,
    ) -> Result<DataFrame, Error> {
        self.frame(curve, query, "utc", Some(chrono_tz::CET), naive_datetime).await
    }

    // The registry walk: one arm per curve associates the identifier with
    // its record shape. Adding a curve adds exactly one arm here.
    async fn frame(
        &self,
        curve: Curve,
        query: &CurveQuery,
        index_col: &str,
        zone: Option<Tz>,
        naive: bool,
    ) -> Result<DataFrame, Error> {
        match curve {
            Curve::ItalyPrices => {
                self.fetch_frame::<ItalyPrices>(query, index_col, zone, naive).await
            }
            Curve::ItalyXbidResults => {
                self.fetch_frame::<ItalyXbidResults>(query, index_col, zone, naive).await
            }
            Curve::ItalyExchangeVolumes => {
                self.fetch_frame::<ItalyExchangeVolumes>(query, index_col, zone, naive).await
            }
            Curve::ItalyAncillaryServices => {
                self.fetch_frame::<ItalyAncillaryServices>(query, index_col, zone, naive).await
            }
            Curve::ItalyDamDemandAct => {
                self.fetch_frame::<ItalyDamDemandAct>(query, index_col, zone, naive).await
            }
            Curve::ItalyDamDemandFcs => {
                self.fetch_frame::<ItalyDamDemandFcs>(query, index_col, zone, naive).await
            }
            Curve::ItalyCommercialFlows => {
                self.fetch_frame::<ItalyCommercialFlows>(query, index_col, zone, naive).await
            }
            Curve::ItalyCommercialFlowLimits => {
                self.fetch_frame::<ItalyCommercialFlowLimits>(query, index_col, zone, naive).await
            }
            Curve::ItalyLoadActual => {
                self.fetch_frame::<ItalyLoadActual>(query, index_col, zone, naive).await
            }
            Curve::ItalyLoadForecast => {
                self.fetch_frame::<ItalyLoadForecast>(query, index_col, zone, naive).await
            }
            Curve::ItalyGeneration => {
                self.fetch_frame::<ItalyGeneration>(query, index_col, zone, naive).await
            }
            Curve::ItalyGenerationForecast => {
                self.fetch_frame::<ItalyGenerationForecast>(query, index_col, zone, naive).await
            }
            Curve::ItalyImbalanceData => {
                self.fetch_frame::<ItalyImbalanceData>(query, index_col, zone, naive).await
            }
            Curve::SpainPrices => {
                self.fetch_frame::<SpainPrices>(query, index_col, zone, naive).await
            }
            Curve::SpainXbidResults => {
                self.fetch_frame::<SpainXbidResults>(query, index_col, zone, naive).await
            }
        }
    }

    async fn fetch_frame<C: CurveSpec>(
        &self,
        query: &CurveQuery,
        index_col: &str,
        zone: Option<Tz>,
        naive: bool,
    ) -> Result<DataFrame, Error> {
        let response = self.get::<C>(query).await?;
        match zone {
            Some(tz) => response.to_frame_in_zone(tz, index_col, naive),
            None => response.to_frame(index_col, naive),
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            Error::Connection(err)
        }
    }

    async fn error_from_response(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "authentication rejected");
            return Error::Authentication {
                status: status.as_u16(),
            };
        }

        let header_request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<serde_json::Value> = serde_json::from_str(&body).ok();

        let detail = parsed
            .as_ref()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()))
            .map(str::to_owned)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown API error").to_string()
                } else {
                    body.clone()
                }
            });
        let request_id = header_request_id.or_else(|| {
            parsed
                .as_ref()
                .and_then(|v| v.get("request_id").and_then(|r| r.as_str()))
                .map(str::to_owned)
        });

        warn!(status = status.as_u16(), "API returned an error response");
        Error::Api {
            status: status.as_u16(),
            detail,
            request_id,
        }
    }
}

/// Builder for [`Client`] with overrides for the base URL and timeout.
pub struct ClientBuilder {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the base URL (e.g. for a staging deployment). A trailing
    /// slash is stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client, attaching the auth headers once.
    pub fn build(self) -> Result<Client, Error> {
        let mut headers = header::HeaderMap::new();
        let mut auth =
            header::HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
                .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            http,
            base_url: self.base_url,
            timeout_secs: self.timeout.as_secs(),
            _api_key: self.api_key,
        })
    }
}
