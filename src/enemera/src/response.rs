//! The in-memory result of one curve call.

use chrono_tz::Tz;
use polars::prelude::DataFrame;
use serde::de::DeserializeOwned;

use crate::errors::Error;
use crate::io::frame::Frame;
use crate::models::record::TimeSeriesRecord;

/// Ordered, fully materialized set of records returned by one call.
///
/// Row order is the server's response order; nothing is re-sorted. The
/// response owns its records and is discarded after conversion or
/// consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    records: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<T> IntoIterator for ApiResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ApiResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T> std::ops::Index<usize> for ApiResponse<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.records[index]
    }
}

impl<T: TimeSeriesRecord> ApiResponse<T> {
    /// Materialize into a polars `DataFrame`.
    ///
    /// `index_col` names the timestamp column promoted to the first
    /// position; the remaining columns follow in declaration order.
    /// `naive_datetime = true` strips timezone information while keeping
    /// the UTC wall-clock values.
    pub fn to_frame(&self, index_col: &str, naive_datetime: bool) -> Result<DataFrame, Error> {
        Frame::from_records(self.records(), index_col)?.to_polars(None, naive_datetime)
    }

    /// As [`to_frame`](Self::to_frame), converting every timestamp into
    /// `zone` first.
    pub fn to_frame_in_zone(
        &self,
        zone: Tz,
        index_col: &str,
        naive_datetime: bool,
    ) -> Result<DataFrame, Error> {
        Frame::from_records(self.records(), index_col)?.to_polars(Some(zone), naive_datetime)
    }

    /// Frame with timestamps in the Central European zone, indexed on
    /// `utc`. The common representation for the Italian market.
    pub fn to_frame_cet(&self, naive_datetime: bool) -> Result<DataFrame, Error> {
        self.to_frame_in_zone(chrono_tz::CET, "utc", naive_datetime)
    }
}

/// Parse a raw JSON array payload into typed records.
///
/// The whole batch fails on the first element that does not match the
/// shape; the error carries the element's position and serde's account of
/// the missing, unexpected or mistyped field.
pub(crate) fn parse_records<T: DeserializeOwned>(payload: &str) -> Result<Vec<T>, Error> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(payload).map_err(|e| Error::Deserialize {
            index: None,
            detail: e.to_string(),
        })?;

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).map_err(|e| Error::Deserialize {
                index: Some(index),
                detail: e.to_string(),
            })
        })
        .collect()
}
