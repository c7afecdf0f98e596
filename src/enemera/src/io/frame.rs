//! Canonical tabular form and the polars adapter.
//!
//! [`Frame`] is the library-independent representation: named, typed
//! columns in declaration order, rows in record order, with one designated
//! timestamp column tracked as the index. The polars conversion is the only
//! place that knows about a concrete dataframe library; timezone handling
//! happens there, at emission time, so the canonical form always stores
//! UTC.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use polars::prelude::*;

use crate::errors::Error;
use crate::models::record::{Cell, FieldKind, TimeSeriesRecord};

/// Ordered columns and rows, independent of any dataframe library.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position of the index column in `columns`.
    index: usize,
    columns: Vec<FrameColumn>,
    height: usize,
}

#[derive(Debug, Clone)]
struct FrameColumn {
    name: &'static str,
    values: ColumnValues,
}

#[derive(Debug, Clone)]
enum ColumnValues {
    Timestamp(Vec<Option<DateTime<Utc>>>),
    Utf8(Vec<Option<String>>),
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Bool(Vec<Option<bool>>),
}

impl ColumnValues {
    fn with_capacity(kind: FieldKind, capacity: usize) -> Self {
        match kind {
            FieldKind::Timestamp => ColumnValues::Timestamp(Vec::with_capacity(capacity)),
            FieldKind::Utf8 => ColumnValues::Utf8(Vec::with_capacity(capacity)),
            FieldKind::Float => ColumnValues::Float(Vec::with_capacity(capacity)),
            FieldKind::Int => ColumnValues::Int(Vec::with_capacity(capacity)),
            FieldKind::Bool => ColumnValues::Bool(Vec::with_capacity(capacity)),
        }
    }

    fn push(&mut self, cell: Cell) {
        match (self, cell) {
            (ColumnValues::Timestamp(v), Cell::Timestamp(value)) => v.push(value),
            (ColumnValues::Utf8(v), Cell::Utf8(value)) => v.push(value),
            (ColumnValues::Float(v), Cell::Float(value)) => v.push(value),
            (ColumnValues::Int(v), Cell::Int(value)) => v.push(value),
            (ColumnValues::Bool(v), Cell::Bool(value)) => v.push(value),
            (_, cell) => panic!("record cell kind {:?} out of step with its schema", cell.kind()),
        }
    }
}

impl Frame {
    /// Build from records, promoting `index_col` to the index position.
    ///
    /// `index_col` must name a timestamp column of the record's schema.
    /// An empty slice yields a zero-row frame with the full column schema.
    pub fn from_records<R: TimeSeriesRecord>(records: &[R], index_col: &str) -> Result<Self, Error> {
        let schema = R::schema();
        let index = schema
            .iter()
            .position(|f| f.name == index_col)
            .ok_or_else(|| Error::Config(format!("unknown index column '{index_col}'")))?;
        if schema[index].kind != FieldKind::Timestamp {
            return Err(Error::Config(format!(
                "index column '{index_col}' is not a timestamp column"
            )));
        }

        let mut columns: Vec<FrameColumn> = schema
            .iter()
            .map(|f| FrameColumn {
                name: f.name,
                values: ColumnValues::with_capacity(f.kind, records.len()),
            })
            .collect();

        for record in records {
            let cells = record.cells();
            assert_eq!(cells.len(), schema.len(), "record cells out of step with schema");
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.values.push(cell);
            }
        }

        Ok(Self {
            index,
            columns,
            height: records.len(),
        })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Name of the designated index column.
    pub fn index_column(&self) -> &str {
        self.columns[self.index].name
    }

    /// Emit a polars `DataFrame`: index column first, remaining columns in
    /// declaration order.
    ///
    /// With `zone` set, timestamps are converted into that zone before
    /// placement. `naive` strips the timezone annotation, keeping
    /// wall-clock values.
    pub fn to_polars(&self, zone: Option<Tz>, naive: bool) -> Result<DataFrame, Error> {
        let order = std::iter::once(self.index)
            .chain((0..self.columns.len()).filter(|&i| i != self.index));

        let mut series = Vec::with_capacity(self.columns.len());
        for position in order {
            series.push(self.columns[position].to_series(zone, naive)?);
        }
        Ok(DataFrame::new(series.into_iter().map(Column::from).collect())?)
    }
}

impl FrameColumn {
    fn to_series(&self, zone: Option<Tz>, naive: bool) -> Result<Series, Error> {
        let series = match &self.values {
            ColumnValues::Utf8(v) => Series::new(self.name.into(), v.as_slice()),
            ColumnValues::Float(v) => Series::new(self.name.into(), v.as_slice()),
            ColumnValues::Int(v) => Series::new(self.name.into(), v.as_slice()),
            ColumnValues::Bool(v) => Series::new(self.name.into(), v.as_slice()),
            ColumnValues::Timestamp(v) => timestamp_series(self.name, v, zone, naive)?,
        };
        Ok(series)
    }
}

fn timestamp_series(
    name: &str,
    values: &[Option<DateTime<Utc>>],
    zone: Option<Tz>,
    naive: bool,
) -> Result<Series, Error> {
    // Physical values are microseconds since the epoch. Aware columns keep
    // the UTC instant and carry the zone as dtype metadata; naive columns
    // store the wall clock of the requested zone.
    let micros: Vec<Option<i64>> = match zone {
        Some(tz) if naive => values
            .iter()
            .map(|v| {
                v.map(|dt| dt.with_timezone(&tz).naive_local().and_utc().timestamp_micros())
            })
            .collect(),
        _ => values.iter().map(|v| v.map(|dt| dt.timestamp_micros())).collect(),
    };

    let time_zone: Option<TimeZone> = if naive {
        None
    } else {
        Some(match zone {
            Some(tz) => tz.name().into(),
            None => "UTC".into(),
        })
    };

    let series = Series::new(name.into(), micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, time_zone))?;
    Ok(series)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;
    use crate::models::italy::{ImbalanceRecord, PriceRecord};

    fn price(utc: DateTime<Utc>, price: f64) -> PriceRecord {
        PriceRecord {
            utc,
            market: "MGP".to_string(),
            zone: "NORD".to_string(),
            price,
        }
    }

    fn sample() -> Vec<PriceRecord> {
        vec![
            price(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(), 45.2),
            price(Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap(), 47.9),
        ]
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_zero_rows_with_full_schema() {
        let frame = Frame::from_records::<PriceRecord>(&[], "utc").unwrap();
        let df = frame.to_polars(None, false).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(column_names(&df), ["utc", "market", "zone", "price"]);
        assert_eq!(
            df.column("price").unwrap().dtype(),
            &DataType::Float64
        );
    }

    #[test]
    fn index_column_is_emitted_first() {
        let frame = Frame::from_records(&sample(), "utc").unwrap();
        assert_eq!(frame.index_column(), "utc");
        assert_eq!(frame.height(), 2);
        let df = frame.to_polars(None, false).unwrap();
        assert_eq!(column_names(&df)[0], "utc");
    }

    #[test]
    fn unknown_index_column_is_rejected() {
        let err = Frame::from_records(&sample(), "timestamp").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_timestamp_index_column_is_rejected() {
        let err = Frame::from_records(&sample(), "price").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn aware_utc_carries_the_zone_as_metadata() {
        let df = Frame::from_records(&sample(), "utc")
            .unwrap()
            .to_polars(None, false)
            .unwrap();
        assert_eq!(
            df.column("utc").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Microseconds, Some("UTC".into()))
        );
    }

    #[test]
    fn naive_and_aware_agree_on_utc_wall_clock() {
        let frame = Frame::from_records(&sample(), "utc").unwrap();
        let aware = frame.to_polars(None, false).unwrap();
        let naive = frame.to_polars(None, true).unwrap();

        assert_eq!(
            naive.column("utc").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Microseconds, None)
        );
        let aware_micros = aware
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        let naive_micros = naive
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        assert_eq!(aware_micros, naive_micros);
    }

    #[test]
    fn zone_conversion_shifts_the_naive_wall_clock() {
        let frame = Frame::from_records(&sample(), "utc").unwrap();
        let utc_naive = frame.to_polars(None, true).unwrap();
        let rome_naive = frame.to_polars(Some(chrono_tz::Europe::Rome), true).unwrap();

        let utc_first = utc_naive
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        let rome_first = rome_naive
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        // 2024-06-15 is CEST, two hours ahead of UTC.
        assert_eq!(rome_first - utc_first, 2 * 3_600 * 1_000_000);
    }

    #[test]
    fn aware_zone_conversion_keeps_the_instant() {
        let frame = Frame::from_records(&sample(), "utc").unwrap();
        let utc_aware = frame.to_polars(None, false).unwrap();
        let rome_aware = frame.to_polars(Some(chrono_tz::Europe::Rome), false).unwrap();

        assert_eq!(
            rome_aware.column("utc").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Microseconds, Some("Europe/Rome".into()))
        );
        let utc_first = utc_aware
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        let rome_first = rome_aware
            .column("utc")
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(0)
            .unwrap();
        assert_eq!(utc_first, rome_first);
    }

    #[test]
    fn null_cells_stay_null_in_every_column_kind() {
        let record: ImbalanceRecord = serde_json::from_value(serde_json::json!({
            "utc": "2024-01-01T00:00:00Z",
            "macrozone": "NORD"
        }))
        .unwrap();
        let df = Frame::from_records(&[record], "utc")
            .unwrap()
            .to_polars(None, false)
            .unwrap();

        assert_eq!(df.column("imb_volume").unwrap().null_count(), 1);
        assert_eq!(df.column("imb_sign").unwrap().null_count(), 1);
        assert_eq!(df.column("is_final_sign").unwrap().null_count(), 1);
        assert_eq!(df.column("imb_sign").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("is_final_sign").unwrap().dtype(), &DataType::Boolean);
    }

    #[test]
    fn materialization_is_deterministic() {
        let records = sample();
        let a = Frame::from_records(&records, "utc").unwrap().to_polars(None, false).unwrap();
        let b = Frame::from_records(&records, "utc").unwrap().to_polars(None, false).unwrap();
        assert!(a.equals_missing(&b));
        assert_eq!(column_names(&a), column_names(&b));
    }
}
