//! Per-type column builders.
//!
//! Each mapped field gets one builder. Raw cells are pushed row by row and
//! coerced to the declared [`FieldType`]; an empty cell is always null.

use chrono::NaiveDate;
use dvf_common::{days_from_date, parse_f64, parse_i64};
use dvf_model::{FieldType, SourceField};
use polars::prelude::*;

/// Accumulates the coerced values of one field.
#[derive(Debug)]
pub(crate) enum ColumnBuilder {
    Text {
        name: &'static str,
        values: Vec<Option<String>>,
    },
    Float {
        name: &'static str,
        values: Vec<Option<f64>>,
    },
    Int {
        name: &'static str,
        values: Vec<Option<i64>>,
    },
    Date {
        name: &'static str,
        format: &'static str,
        values: Vec<Option<i32>>,
    },
}

impl ColumnBuilder {
    pub(crate) fn new(field: &SourceField) -> Self {
        let name = field.canonical;
        match field.field_type {
            FieldType::Text => Self::Text {
                name,
                values: Vec::new(),
            },
            FieldType::Float => Self::Float {
                name,
                values: Vec::new(),
            },
            FieldType::NullableInt => Self::Int {
                name,
                values: Vec::new(),
            },
            FieldType::Date { format } => Self::Date {
                name,
                format,
                values: Vec::new(),
            },
        }
    }

    /// Coerce and append one cell.
    ///
    /// Returns `false` when a non-empty cell does not parse as the declared
    /// type; nothing is appended in that case.
    pub(crate) fn push(&mut self, raw: &str) -> bool {
        let cell = raw.trim();
        let empty = cell.is_empty();
        match self {
            Self::Text { values, .. } => {
                values.push((!empty).then(|| cell.to_string()));
                true
            }
            Self::Float { values, .. } => push_parsed(values, cell, parse_f64),
            Self::Int { values, .. } => push_parsed(values, cell, parse_i64),
            Self::Date { values, format, .. } => push_parsed(values, cell, |c| {
                NaiveDate::parse_from_str(c, format)
                    .ok()
                    .map(days_from_date)
            }),
        }
    }

    /// Build the typed column.
    pub(crate) fn finish(self) -> PolarsResult<Column> {
        let series = match self {
            Self::Text { name, values } => Series::new(name.into(), values),
            Self::Float { name, values } => Series::new(name.into(), values),
            Self::Int { name, values } => Series::new(name.into(), values),
            Self::Date { name, values, .. } => {
                Series::new(name.into(), values).cast(&DataType::Date)?
            }
        };
        Ok(series.into())
    }
}

fn push_parsed<T>(values: &mut Vec<Option<T>>, cell: &str, parse: impl Fn(&str) -> Option<T>) -> bool {
    if cell.is_empty() {
        values.push(None);
        return true;
    }
    match parse(cell) {
        Some(value) => {
            values.push(Some(value));
            true
        }
        None => false,
    }
}
