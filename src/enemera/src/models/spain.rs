//! Record shapes for the Spanish market curves.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::record::{Cell, FieldDef, FieldKind, TimeSeriesRecord};

/// Zonal price for one Spanish market and delivery period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpainPriceRecord {
    pub utc: DateTime<Utc>,
    /// Market identifier (e.g. "MD", "MI1").
    pub market: String,
    pub zone: String,
    /// Price in EUR/MWh.
    pub price: f64,
}

impl TimeSeriesRecord for SpainPriceRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("market", FieldKind::Utf8),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("price", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.market.clone())),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Float(Some(self.price)),
        ]
    }
}

/// XBID session recap for one Spanish zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpainXbidRecord {
    pub utc: DateTime<Utc>,
    pub zone: String,
    /// Weighted average price in EUR/MWh.
    #[serde(default)]
    pub wavg_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl TimeSeriesRecord for SpainXbidRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("wavg_price", FieldKind::Float),
            FieldDef::new("min_price", FieldKind::Float),
            FieldDef::new("max_price", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Float(self.wavg_price),
            Cell::Float(self.min_price),
            Cell::Float(self.max_price),
        ]
    }
}
