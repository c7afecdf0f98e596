//! Record shapes for the Italian market curves.
//!
//! Every struct below is one row of its curve's payload. Deserialization is
//! strict: unknown keys are rejected, required fields must be present, and
//! no value is coerced across type boundaries. Optional fields accept
//! `null` or omission and surface as `None`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::record::{Cell, FieldDef, FieldKind, TimeSeriesRecord};

/// Zonal price for one market and delivery period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRecord {
    /// Delivery period start (UTC).
    pub utc: DateTime<Utc>,
    /// Market identifier (e.g. "MGP", "MI1").
    pub market: String,
    /// Zone identifier (e.g. "NORD").
    pub zone: String,
    /// Price in EUR/MWh.
    pub price: f64,
}

impl TimeSeriesRecord for PriceRecord {
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

/// Session recap of the continuous intraday (XBID) market for one zone.
///
/// Price fields are absent for periods without trades.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XbidRecapRecord {
    pub utc: DateTime<Utc>,
    pub zone: String,
    /// Time resolution of the period (e.g. "PT60M", "PT15M").
    pub time_resolution: String,
    #[serde(default)]
    pub first_price: Option<f64>,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub ref_price: Option<f64>,
    #[serde(default)]
    pub last_hour_price: Option<f64>,
    #[serde(default)]
    pub buy_volume: Option<f64>,
    #[serde(default)]
    pub sell_volume: Option<f64>,
}

impl TimeSeriesRecord for XbidRecapRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("time_resolution", FieldKind::Utf8),
            FieldDef::new("first_price", FieldKind::Float),
            FieldDef::new("last_price", FieldKind::Float),
            FieldDef::new("min_price", FieldKind::Float),
            FieldDef::new("max_price", FieldKind::Float),
            FieldDef::new("ref_price", FieldKind::Float),
            FieldDef::new("last_hour_price", FieldKind::Float),
            FieldDef::new("buy_volume", FieldKind::Float),
            FieldDef::new("sell_volume", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Utf8(Some(self.time_resolution.clone())),
            Cell::Float(self.first_price),
            Cell::Float(self.last_price),
            Cell::Float(self.min_price),
            Cell::Float(self.max_price),
            Cell::Float(self.ref_price),
            Cell::Float(self.last_hour_price),
            Cell::Float(self.buy_volume),
            Cell::Float(self.sell_volume),
        ]
    }
}

/// Traded quantity for one market, zone and purpose (BUY or SELL).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantityRecord {
    pub utc: DateTime<Utc>,
    pub market: String,
    pub zone: String,
    /// "BUY" or "SELL".
    pub purpose: String,
    /// Quantity in MWh.
    pub quantity: f64,
}

impl TimeSeriesRecord for QuantityRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("market", FieldKind::Utf8),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("purpose", FieldKind::Utf8),
            FieldDef::new("quantity", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.market.clone())),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Utf8(Some(self.purpose.clone())),
            Cell::Float(Some(self.quantity)),
        ]
    }
}

/// Ancillary services (MSD/MB) results for one zone and segment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AncillaryServicesRecord {
    pub utc: DateTime<Utc>,
    pub zone: String,
    /// Market identifier (e.g. "MSD", "MB").
    pub market: String,
    /// Market segment (e.g. "MSD", "MBs", "MBa").
    pub segment: String,
    #[serde(default)]
    pub buy_volume: Option<f64>,
    #[serde(default)]
    pub sell_volume: Option<f64>,
    #[serde(default)]
    pub buy_volume_no_rev: Option<f64>,
    #[serde(default)]
    pub sell_volume_no_rev: Option<f64>,
    #[serde(default)]
    pub avg_buy_price: Option<f64>,
    #[serde(default)]
    pub avg_sell_price: Option<f64>,
    #[serde(default)]
    pub max_sell_price: Option<f64>,
    #[serde(default)]
    pub min_buy_price: Option<f64>,
}

impl TimeSeriesRecord for AncillaryServicesRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("market", FieldKind::Utf8),
            FieldDef::new("segment", FieldKind::Utf8),
            FieldDef::new("buy_volume", FieldKind::Float),
            FieldDef::new("sell_volume", FieldKind::Float),
            FieldDef::new("buy_volume_no_rev", FieldKind::Float),
            FieldDef::new("sell_volume_no_rev", FieldKind::Float),
            FieldDef::new("avg_buy_price", FieldKind::Float),
            FieldDef::new("avg_sell_price", FieldKind::Float),
            FieldDef::new("max_sell_price", FieldKind::Float),
            FieldDef::new("min_buy_price", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Utf8(Some(self.market.clone())),
            Cell::Utf8(Some(self.segment.clone())),
            Cell::Float(self.buy_volume),
            Cell::Float(self.sell_volume),
            Cell::Float(self.buy_volume_no_rev),
            Cell::Float(self.sell_volume_no_rev),
            Cell::Float(self.avg_buy_price),
            Cell::Float(self.avg_sell_price),
            Cell::Float(self.max_sell_price),
            Cell::Float(self.min_buy_price),
        ]
    }
}

/// Scheduled commercial flow between two zones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowRecord {
    pub utc: DateTime<Utc>,
    pub market: String,
    pub zone_from: String,
    pub zone_to: String,
    /// Flow in MW.
    pub flow: f64,
}

impl TimeSeriesRecord for FlowRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("market", FieldKind::Utf8),
            FieldDef::new("zone_from", FieldKind::Utf8),
            FieldDef::new("zone_to", FieldKind::Utf8),
            FieldDef::new("flow", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.market.clone())),
            Cell::Utf8(Some(self.zone_from.clone())),
            Cell::Utf8(Some(self.zone_to.clone())),
            Cell::Float(Some(self.flow)),
        ]
    }
}

/// Transfer limit on the flow between two zones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowLimitRecord {
    pub utc: DateTime<Utc>,
    pub market: String,
    pub zone_from: String,
    pub zone_to: String,
    /// Limit in MW.
    pub flow_limit: f64,
    pub coefficient: f64,
}

impl TimeSeriesRecord for FlowLimitRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("market", FieldKind::Utf8),
            FieldDef::new("zone_from", FieldKind::Utf8),
            FieldDef::new("zone_to", FieldKind::Utf8),
            FieldDef::new("flow_limit", FieldKind::Float),
            FieldDef::new("coefficient", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.market.clone())),
            Cell::Utf8(Some(self.zone_from.clone())),
            Cell::Utf8(Some(self.zone_to.clone())),
            Cell::Float(Some(self.flow_limit)),
            Cell::Float(Some(self.coefficient)),
        ]
    }
}

/// Actual day-ahead demand for one zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActualDemandRecord {
    pub utc: DateTime<Utc>,
    pub zone: String,
    /// Demand in MW.
    pub demand: f64,
}

impl TimeSeriesRecord for ActualDemandRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("demand", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Float(Some(self.demand)),
        ]
    }
}

/// Estimated day-ahead demand for one zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatedDemandRecord {
    pub utc: DateTime<Utc>,
    pub zone: String,
    /// Estimated demand in MW.
    pub demand: f64,
}

impl TimeSeriesRecord for EstimatedDemandRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("zone", FieldKind::Utf8),
            FieldDef::new("demand", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.zone.clone())),
            Cell::Float(Some(self.demand)),
        ]
    }
}

/// Measured or forecast load for one area.
///
/// Shared by the actual and forecast curves; only the endpoint differs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadRecord {
    pub utc: DateTime<Utc>,
    pub area: String,
    /// Load in MW.
    #[serde(default)]
    pub data_value: Option<f64>,
}

impl TimeSeriesRecord for LoadRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("area", FieldKind::Utf8),
            FieldDef::new("data_value", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.area.clone())),
            Cell::Float(self.data_value),
        ]
    }
}

/// Measured or forecast generation for one area and technology.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRecord {
    pub utc: DateTime<Utc>,
    pub area: String,
    /// Generation technology (e.g. "WIND", "SOLAR", "HYDRO").
    pub gen_type: String,
    /// Generation in MW.
    #[serde(default)]
    pub data_value: Option<f64>,
}

impl TimeSeriesRecord for GenerationRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("area", FieldKind::Utf8),
            FieldDef::new("gen_type", FieldKind::Utf8),
            FieldDef::new("data_value", FieldKind::Float),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.area.clone())),
            Cell::Utf8(Some(self.gen_type.clone())),
            Cell::Float(self.data_value),
        ]
    }
}

/// Macrozonal imbalance data.
///
/// Most fields are published with a delay and revised later; the
/// `is_final_*` flags distinguish provisional from settled values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImbalanceRecord {
    pub utc: DateTime<Utc>,
    /// Macrozone identifier ("NORD" or "SUD").
    pub macrozone: String,
    /// Imbalance volume in MWh.
    #[serde(default)]
    pub imb_volume: Option<f64>,
    /// Imbalance sign (-1, 0 or 1).
    #[serde(default)]
    pub imb_sign: Option<i8>,
    /// Imbalance price in EUR/MWh.
    #[serde(default)]
    pub imb_price: Option<f64>,
    /// Imbalance base price in EUR/MWh.
    #[serde(default)]
    pub imb_base_price: Option<f64>,
    /// Non-arbitrage price (PNAMZ) in EUR/MWh.
    #[serde(default)]
    pub pnamz: Option<f64>,
    /// Scheduled exchanges in MW.
    #[serde(default)]
    pub scambi: Option<f64>,
    /// Cross-border exchanges in MW.
    #[serde(default)]
    pub estero: Option<f64>,
    #[serde(default)]
    pub is_final_sign: Option<bool>,
    #[serde(default)]
    pub is_final_price: Option<bool>,
    #[serde(default)]
    pub is_final_pnamz: Option<bool>,
}

impl TimeSeriesRecord for ImbalanceRecord {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn schema() -> &'static [FieldDef] {
        const SCHEMA: &[FieldDef] = &[
            FieldDef::new("utc", FieldKind::Timestamp),
            FieldDef::new("macrozone", FieldKind::Utf8),
            FieldDef::new("imb_volume", FieldKind::Float),
            FieldDef::new("imb_sign", FieldKind::Int),
            FieldDef::new("imb_price", FieldKind::Float),
            FieldDef::new("imb_base_price", FieldKind::Float),
            FieldDef::new("pnamz", FieldKind::Float),
            FieldDef::new("scambi", FieldKind::Float),
            FieldDef::new("estero", FieldKind::Float),
            FieldDef::new("is_final_sign", FieldKind::Bool),
            FieldDef::new("is_final_price", FieldKind::Bool),
            FieldDef::new("is_final_pnamz", FieldKind::Bool),
        ];
        SCHEMA
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(Some(self.utc)),
            Cell::Utf8(Some(self.macrozone.clone())),
            Cell::Float(self.imb_volume),
            Cell::Int(self.imb_sign.map(i64::from)),
            Cell::Float(self.imb_price),
            Cell::Float(self.imb_base_price),
            Cell::Float(self.pnamz),
            Cell::Float(self.scambi),
            Cell::Float(self.estero),
            Cell::Bool(self.is_final_sign),
            Cell::Bool(self.is_final_price),
            Cell::Bool(self.is_final_pnamz),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn schema_names<R: TimeSeriesRecord>() -> Vec<&'static str> {
        R::schema().iter().map(|f| f.name).collect()
    }

    #[test]
    fn every_schema_starts_with_utc() {
        assert_eq!(schema_names::<PriceRecord>()[0], "utc");
        assert_eq!(schema_names::<XbidRecapRecord>()[0], "utc");
        assert_eq!(schema_names::<QuantityRecord>()[0], "utc");
        assert_eq!(schema_names::<AncillaryServicesRecord>()[0], "utc");
        assert_eq!(schema_names::<FlowRecord>()[0], "utc");
        assert_eq!(schema_names::<FlowLimitRecord>()[0], "utc");
        assert_eq!(schema_names::<ActualDemandRecord>()[0], "utc");
        assert_eq!(schema_names::<EstimatedDemandRecord>()[0], "utc");
        assert_eq!(schema_names::<LoadRecord>()[0], "utc");
        assert_eq!(schema_names::<GenerationRecord>()[0], "utc");
        assert_eq!(schema_names::<ImbalanceRecord>()[0], "utc");
    }

    #[test]
    fn cells_align_with_schema() {
        let record: ImbalanceRecord = serde_json::from_value(serde_json::json!({
            "utc": "2024-01-01T00:00:00Z",
            "macrozone": "NORD",
            "imb_volume": 120.5,
            "imb_sign": -1,
            "is_final_sign": true
        }))
        .unwrap();

        let cells = record.cells();
        assert_eq!(cells.len(), ImbalanceRecord::schema().len());
        for (cell, field) in cells.iter().zip(ImbalanceRecord::schema()) {
            assert_eq!(cell.kind(), field.kind, "column {}", field.name);
        }
        assert_eq!(record.utc(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(cells[3], Cell::Int(Some(-1)));
        assert_eq!(cells[4], Cell::Float(None));
    }
}
