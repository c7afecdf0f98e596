//! Canonical row representation shared by every curve record.
//!
//! Each record struct is a flat, immutable row: one mandatory UTC timestamp
//! plus curve-specific scalar fields. [`TimeSeriesRecord`] exposes the
//! declared column schema and the row cells in the same order, which is all
//! the tabular layer needs to materialize any curve without knowing its
//! concrete shape.

use chrono::{DateTime, Utc};

/// The kind of a record field.
///
/// Gives frames a stable column schema even when no rows are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Timestamp,
    Utf8,
    Float,
    Int,
    Bool,
}

/// One cell of a materialized row.
///
/// Optional source fields surface as `None`; they are never coerced to zero
/// or an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Timestamp(Option<DateTime<Utc>>),
    Utf8(Option<String>),
    Float(Option<f64>),
    Int(Option<i64>),
    Bool(Option<bool>),
}

impl Cell {
    /// The [`FieldKind`] this cell belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Cell::Timestamp(_) => FieldKind::Timestamp,
            Cell::Utf8(_) => FieldKind::Utf8,
            Cell::Float(_) => FieldKind::Float,
            Cell::Int(_) => FieldKind::Int,
            Cell::Bool(_) => FieldKind::Bool,
        }
    }
}

/// A named, typed slot in a record's declared schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A typed row of one curve.
///
/// Implementations must keep [`cells`](Self::cells) aligned one-to-one with
/// [`schema`](Self::schema): same length, same order, matching kinds. The
/// frame builder panics on a misaligned implementation rather than
/// producing a silently wrong table.
pub trait TimeSeriesRecord {
    /// The UTC timestamp every record carries.
    fn utc(&self) -> DateTime<Utc>;

    /// Column schema in declaration order. The first entry is always `utc`.
    fn schema() -> &'static [FieldDef];

    /// Row cells, aligned with [`schema`](Self::schema).
    fn cells(&self) -> Vec<Cell>;
}
