//! The curve registry.
//!
//! [`Curve`] is the closed set of datasets the API exposes. Every value
//! resolves to exactly one endpoint path and one record shape; the shape
//! side of the pair is carried by the zero-sized marker types implementing
//! [`CurveSpec`]. Adding a curve means one enum value, one marker, and one
//! arm in [`Client::get_frame`](crate::client::Client); the dispatch logic
//! itself does not change.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::errors::Error;
use crate::models::italy::{
    ActualDemandRecord, AncillaryServicesRecord, EstimatedDemandRecord, FlowLimitRecord,
    FlowRecord, GenerationRecord, ImbalanceRecord, LoadRecord, PriceRecord, QuantityRecord,
    XbidRecapRecord,
};
use crate::models::record::TimeSeriesRecord;
use crate::models::spain::{SpainPriceRecord, SpainXbidRecord};

/// Data curves available in the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    ItalyPrices,
    ItalyXbidResults,
    ItalyExchangeVolumes,
    ItalyAncillaryServices,
    ItalyDamDemandAct,
    ItalyDamDemandFcs,
    ItalyCommercialFlows,
    ItalyCommercialFlowLimits,
    ItalyLoadActual,
    ItalyLoadForecast,
    ItalyGeneration,
    ItalyGenerationForecast,
    ItalyImbalanceData,
    SpainPrices,
    SpainXbidResults,
}

impl Curve {
    /// Every curve in the registry, in a fixed order.
    pub const ALL: [Curve; 15] = [
        Curve::ItalyPrices,
        Curve::ItalyXbidResults,
        Curve::ItalyExchangeVolumes,
        Curve::ItalyAncillaryServices,
        Curve::ItalyDamDemandAct,
        Curve::ItalyDamDemandFcs,
        Curve::ItalyCommercialFlows,
        Curve::ItalyCommercialFlowLimits,
        Curve::ItalyLoadActual,
        Curve::ItalyLoadForecast,
        Curve::ItalyGeneration,
        Curve::ItalyGenerationForecast,
        Curve::ItalyImbalanceData,
        Curve::SpainPrices,
        Curve::SpainXbidResults,
    ];

    /// The endpoint path for this curve, relative to the base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Curve::ItalyPrices => "/italy/prices",
            Curve::ItalyXbidResults => "/italy/xbid/results",
            Curve::ItalyExchangeVolumes => "/italy/exchange-volumes",
            Curve::ItalyAncillaryServices => "/italy/ancillary-services",
            Curve::ItalyDamDemandAct => "/italy/dam-demand/actual",
            Curve::ItalyDamDemandFcs => "/italy/dam-demand/forecast",
            Curve::ItalyCommercialFlows => "/italy/commercial-flows",
            Curve::ItalyCommercialFlowLimits => "/italy/commercial-flow-limits",
            Curve::ItalyLoadActual => "/italy/load/actual",
            Curve::ItalyLoadForecast => "/italy/load/forecast",
            Curve::ItalyGeneration => "/italy/generation",
            Curve::ItalyGenerationForecast => "/italy/generation/forecast",
            Curve::ItalyImbalanceData => "/italy/imbalance",
            Curve::SpainPrices => "/spain/prices",
            Curve::SpainXbidResults => "/spain/xbid/results",
        }
    }

    /// Query keys this curve requires beyond the date range.
    ///
    /// Checked before dispatch; a missing key fails the call without any
    /// network activity.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            Curve::ItalyPrices | Curve::SpainPrices => &["market"],
            _ => &[],
        }
    }

    /// The snake_case identifier used by [`FromStr`] and [`fmt::Display`].
    pub fn as_str(self) -> &'static str {
        match self {
            Curve::ItalyPrices => "italy_prices",
            Curve::ItalyXbidResults => "italy_xbid_results",
            Curve::ItalyExchangeVolumes => "italy_exchange_volumes",
            Curve::ItalyAncillaryServices => "italy_ancillary_services",
            Curve::ItalyDamDemandAct => "italy_dam_demand_act",
            Curve::ItalyDamDemandFcs => "italy_dam_demand_fcs",
            Curve::ItalyCommercialFlows => "italy_commercial_flows",
            Curve::ItalyCommercialFlowLimits => "italy_commercial_flow_limits",
            Curve::ItalyLoadActual => "italy_load_actual",
            Curve::ItalyLoadForecast => "italy_load_forecast",
            Curve::ItalyGeneration => "italy_generation",
            Curve::ItalyGenerationForecast => "italy_generation_forecast",
            Curve::ItalyImbalanceData => "italy_imbalance_data",
            Curve::SpainPrices => "spain_prices",
            Curve::SpainXbidResults => "spain_xbid_results",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Curve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Curve::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnsupportedCurve(s.to_string()))
    }
}

/// One registry entry: ties a [`Curve`] value to its record shape so that
/// [`Client::get`](crate::client::Client::get) can resolve the endpoint and
/// the deserialization target from the type parameter alone.
pub trait CurveSpec {
    /// The curve this entry dispatches to.
    const CURVE: Curve;

    /// The typed row shape of the curve's payload.
    type Record: TimeSeriesRecord + DeserializeOwned;
}

/// Day-ahead and intraday zonal prices.
pub struct ItalyPrices;

impl CurveSpec for ItalyPrices {
    const CURVE: Curve = Curve::ItalyPrices;
    type Record = PriceRecord;
}

/// Continuous intraday (XBID) session recaps.
pub struct ItalyXbidResults;

impl CurveSpec for ItalyXbidResults {
    const CURVE: Curve = Curve::ItalyXbidResults;
    type Record = XbidRecapRecord;
}

/// Traded volumes per market, zone and purpose.
pub struct ItalyExchangeVolumes;

impl CurveSpec for ItalyExchangeVolumes {
    const CURVE: Curve = Curve::ItalyExchangeVolumes;
    type Record = QuantityRecord;
}

/// Ancillary services market results (MSD/MB).
pub struct ItalyAncillaryServices;

impl CurveSpec for ItalyAncillaryServices {
    const CURVE: Curve = Curve::ItalyAncillaryServices;
    type Record = AncillaryServicesRecord;
}

/// Actual day-ahead demand per zone.
pub struct ItalyDamDemandAct;

impl CurveSpec for ItalyDamDemandAct {
    const CURVE: Curve = Curve::ItalyDamDemandAct;
    type Record = ActualDemandRecord;
}

/// Forecast day-ahead demand per zone.
pub struct ItalyDamDemandFcs;

impl CurveSpec for ItalyDamDemandFcs {
    const CURVE: Curve = Curve::ItalyDamDemandFcs;
    type Record = EstimatedDemandRecord;
}

/// Scheduled commercial flows between zones.
pub struct ItalyCommercialFlows;

impl CurveSpec for ItalyCommercialFlows {
    const CURVE: Curve = Curve::ItalyCommercialFlows;
    type Record = FlowRecord;
}

/// Transfer limits on inter-zonal flows.
pub struct ItalyCommercialFlowLimits;

impl CurveSpec for ItalyCommercialFlowLimits {
    const CURVE: Curve = Curve::ItalyCommercialFlowLimits;
    type Record = FlowLimitRecord;
}

/// Measured load per area.
pub struct ItalyLoadActual;

impl CurveSpec for ItalyLoadActual {
    const CURVE: Curve = Curve::ItalyLoadActual;
    type Record = LoadRecord;
}

/// Forecast load per area.
pub struct ItalyLoadForecast;

impl CurveSpec for ItalyLoadForecast {
    const CURVE: Curve = Curve::ItalyLoadForecast;
    type Record = LoadRecord;
}

/// Measured generation per area and technology.
pub struct ItalyGeneration;

impl CurveSpec for ItalyGeneration {
    const CURVE: Curve = Curve::ItalyGeneration;
    type Record = GenerationRecord;
}

/// Forecast generation per area and technology.
pub struct ItalyGenerationForecast;

impl CurveSpec for ItalyGenerationForecast {
    const CURVE: Curve = Curve::ItalyGenerationForecast;
    type Record = GenerationRecord;
}

/// Macrozonal imbalance volumes, signs and prices.
pub struct ItalyImbalanceData;

impl CurveSpec for ItalyImbalanceData {
    const CURVE: Curve = Curve::ItalyImbalanceData;
    type Record = ImbalanceRecord;
}

/// Spanish market prices.
pub struct SpainPrices;

impl CurveSpec for SpainPrices {
    const CURVE: Curve = Curve::SpainPrices;
    type Record = SpainPriceRecord;
}

/// Spanish XBID session recaps.
pub struct SpainXbidResults;

impl CurveSpec for SpainXbidResults {
    const CURVE: Curve = Curve::SpainXbidResults;
    type Record = SpainXbidRecord;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for curve in Curve::ALL {
            let parsed = Curve::from_str(curve.as_str()).unwrap();
            assert_eq!(parsed, curve);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = Curve::from_str("unknown_curve_xyz").unwrap_err();
        match err {
            Error::UnsupportedCurve(name) => assert_eq!(name, "unknown_curve_xyz"),
            other => panic!("expected UnsupportedCurve, got {other:?}"),
        }
    }

    #[test]
    fn every_curve_has_an_endpoint() {
        for curve in Curve::ALL {
            let endpoint = curve.endpoint();
            assert!(endpoint.starts_with('/'), "{curve}: {endpoint}");
            assert!(endpoint.len() > 1, "{curve}");
        }
    }

    #[test]
    fn endpoints_are_distinct() {
        for (i, a) in Curve::ALL.iter().enumerate() {
            for b in &Curve::ALL[i + 1..] {
                assert_ne!(a.endpoint(), b.endpoint(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn price_curves_require_a_market() {
        assert_eq!(Curve::ItalyPrices.required_params(), ["market"].as_slice());
        assert_eq!(Curve::SpainPrices.required_params(), ["market"].as_slice());
        assert!(Curve::ItalyLoadActual.required_params().is_empty());
    }
}
