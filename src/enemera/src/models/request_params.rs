//! Caller-facing request parameters and their validation.
//!
//! [`CurveQuery`] collects the date range and the optional categorical
//! filters a curve understands, then [`CurveQuery::build`] normalizes and
//! validates them into the outgoing query list. Building is a pure function
//! of the query's contents; nothing is sent anywhere from here.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::errors::Error;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date accepted in any of the three caller-facing forms.
///
/// Strings are kept verbatim until validation, so a malformed input fails
/// with the literal rejected value in the error.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Raw(String),
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        DateInput::Date(d)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Raw(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Raw(s)
    }
}

impl DateInput {
    /// Resolve to a calendar date, validating string input strictly against
    /// `YYYY-MM-DD`. Datetimes are truncated to their UTC date.
    fn resolve(&self, field: &'static str) -> Result<NaiveDate, Error> {
        match self {
            DateInput::Date(d) => Ok(*d),
            DateInput::DateTime(dt) => Ok(dt.date_naive()),
            DateInput::Raw(s) => {
                NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::Validation {
                    field,
                    value: s.clone(),
                })
            }
        }
    }
}

/// Query parameters for one curve request.
///
/// Unset values are omitted from the outgoing query entirely; the transport
/// never sees a null or empty key.
///
/// # Example
/// ```rust
/// use enemera::CurveQuery;
///
/// let query = CurveQuery::range("2024-01-01", "2024-01-31").market("MGP");
/// let params = query.build().unwrap();
/// assert_eq!(params[0], ("date_from".to_string(), "2024-01-01".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurveQuery {
    date_from: Option<DateInput>,
    date_to: Option<DateInput>,
    filters: IndexMap<String, String>,
}

impl CurveQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query covering `[date_from, date_to]`, inclusive.
    pub fn range(date_from: impl Into<DateInput>, date_to: impl Into<DateInput>) -> Self {
        Self::new().date_from(date_from).date_to(date_to)
    }

    pub fn date_from(mut self, value: impl Into<DateInput>) -> Self {
        self.date_from = Some(value.into());
        self
    }

    pub fn date_to(mut self, value: impl Into<DateInput>) -> Self {
        self.date_to = Some(value.into());
        self
    }

    /// Market filter (e.g. "MGP", "MI1").
    pub fn market(self, value: impl Into<String>) -> Self {
        self.param("market", value)
    }

    /// Zone filter (e.g. "NORD").
    pub fn zone(self, value: impl Into<String>) -> Self {
        self.param("zone", value)
    }

    /// Area filter (e.g. "IT").
    pub fn area(self, value: impl Into<String>) -> Self {
        self.param("area", value)
    }

    /// Purpose filter ("BUY" or "SELL").
    pub fn purpose(self, value: impl Into<String>) -> Self {
        self.param("purpose", value)
    }

    /// Set an arbitrary curve-specific filter.
    ///
    /// Later writes to the same key overwrite the earlier value without
    /// changing its position in the outgoing query.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Set `key` only when a value is present; `None` is omitted from the
    /// outgoing query entirely.
    pub fn maybe_param(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Whether `key` would appear in the built query.
    pub(crate) fn has_param(&self, key: &str) -> bool {
        match key {
            "date_from" => self.date_from.is_some(),
            "date_to" => self.date_to.is_some(),
            _ => self.filters.contains_key(key),
        }
    }

    /// Validate and normalize into the outgoing query list.
    ///
    /// Dates render as `YYYY-MM-DD`; format errors take precedence over the
    /// range check; filters follow the dates in insertion order.
    pub fn build(&self) -> Result<Vec<(String, String)>, Error> {
        let date_from = self
            .date_from
            .as_ref()
            .map(|d| d.resolve("date_from"))
            .transpose()?;
        let date_to = self
            .date_to
            .as_ref()
            .map(|d| d.resolve("date_to"))
            .transpose()?;

        if let (Some(from), Some(to)) = (date_from, date_to) {
            if to < from {
                return Err(Error::InvalidDateRange {
                    date_from: from.format(DATE_FORMAT).to_string(),
                    date_to: to.format(DATE_FORMAT).to_string(),
                });
            }
        }

        let mut params = Vec::with_capacity(2 + self.filters.len());
        if let Some(from) = date_from {
            params.push(("date_from".to_string(), from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = date_to {
            params.push(("date_to".to_string(), to.format(DATE_FORMAT).to_string()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn built(query: CurveQuery) -> Vec<(String, String)> {
        query.build().unwrap()
    }

    #[test]
    fn normalizes_all_three_date_forms() {
        let as_string = CurveQuery::range("2024-01-01", "2024-01-31");
        let as_date = CurveQuery::range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let as_datetime = CurveQuery::range(
            Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        );

        let expected = vec![
            ("date_from".to_string(), "2024-01-01".to_string()),
            ("date_to".to_string(), "2024-01-31".to_string()),
        ];
        assert_eq!(built(as_string), expected);
        assert_eq!(built(as_date), expected);
        assert_eq!(built(as_datetime), expected);
    }

    #[test]
    fn invalid_calendar_date_names_field_and_value() {
        let err = CurveQuery::range("2024-02-30", "2024-03-01").build().unwrap_err();
        match err {
            Error::Validation { field, value } => {
                assert_eq!(field, "date_from");
                assert_eq!(value, "2024-02-30");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_strict_formats() {
        for bad in ["01/02/2024", "2024-1-1x", "20240101", "yesterday"] {
            let err = CurveQuery::new().date_to(bad).build().unwrap_err();
            assert!(matches!(err, Error::Validation { field: "date_to", .. }), "{bad}");
        }
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = CurveQuery::range("2024-02-01", "2024-01-01").build().unwrap_err();
        match err {
            Error::InvalidDateRange { date_from, date_to } => {
                assert_eq!(date_from, "2024-02-01");
                assert_eq!(date_to, "2024-01-01");
            }
            other => panic!("expected InvalidDateRange, got {other:?}"),
        }
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(CurveQuery::range("2024-01-15", "2024-01-15").build().is_ok());
    }

    #[test]
    fn format_errors_take_precedence_over_range_errors() {
        // date_to is both malformed and "before" date_from; the format error wins.
        let err = CurveQuery::range("2024-02-01", "not-a-date").build().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "date_to", .. }));
    }

    #[test]
    fn absent_values_are_omitted() {
        let params = built(
            CurveQuery::range("2024-01-01", "2024-01-02")
                .market("MGP")
                .maybe_param("area", None::<String>),
        );
        assert_eq!(params.len(), 3);
        assert!(params.iter().all(|(_, v)| !v.is_empty()));
        assert!(!params.iter().any(|(k, _)| k == "area"));
    }

    #[test]
    fn filters_keep_insertion_order() {
        let params = built(
            CurveQuery::range("2024-01-01", "2024-01-02")
                .zone("NORD")
                .market("MGP"),
        );
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["date_from", "date_to", "zone", "market"]);
    }

    #[test]
    fn bounds_are_optional() {
        let params = built(CurveQuery::new().market("MGP"));
        assert_eq!(params, vec![("market".to_string(), "MGP".to_string())]);
    }
}
