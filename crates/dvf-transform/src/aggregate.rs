//! Aggregation of the lines of a mutation.
//!
//! A DVF mutation spans several lines (one per lot or parcel). Lines are
//! grouped by identifier: additive fields are summed and every other field
//! keeps the value of the group's first line, null included.

use std::collections::HashMap;
use std::time::Instant;

use dvf_model::fields;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{as_f64, require};

const STAGE: &str = "aggregate";

/// Fields summed per mutation.
pub const ADDITIVE_FIELDS: &[&str] = &[fields::SURFACE, fields::NB_ROOM];

/// Collapse the lines of each mutation into one record.
pub fn group_by_mutation(df: DataFrame) -> Result<DataFrame> {
    group_first_summing(df, fields::ID_MUTATION, ADDITIVE_FIELDS)
}

/// Group rows by `key`, summing `additive` fields and keeping the first
/// value of every other field.
///
/// Groups come out in order of first appearance. Rows with a null key are
/// excluded. Null additive values count as zero.
pub fn group_first_summing(df: DataFrame, key: &str, additive: &[&str]) -> Result<DataFrame> {
    let start = Instant::now();
    let rows_in = df.height();

    let groups = assign_groups(&df, key)?;

    let mut sums = Vec::with_capacity(additive.len());
    for &field in additive {
        let values = as_f64(require(&df, field, STAGE)?)?;
        let mut totals = vec![0.0; groups.first_rows.len()];
        for (group, value) in groups.row_groups.iter().zip(values.into_iter()) {
            if let (Some(group), Some(value)) = (group, value) {
                totals[*group] += value;
            }
        }
        sums.push(Series::new(field.into(), totals));
    }

    let mut out = df.take(&IdxCa::from_vec("idx".into(), groups.first_rows))?;
    for series in sums {
        out.with_column(series)?;
    }

    tracing::info!(
        stage = STAGE,
        key,
        rows_in,
        groups = out.height(),
        duration_ms = start.elapsed().as_millis(),
        "Grouped records"
    );
    Ok(out)
}

struct Groups {
    /// Row index of the first member of each group, in group order.
    first_rows: Vec<IdxSize>,
    /// Group of each input row; `None` for null keys.
    row_groups: Vec<Option<usize>>,
}

fn assign_groups(df: &DataFrame, key: &str) -> Result<Groups> {
    let keys = require(df, key, STAGE)?.cast(&DataType::String)?;
    let keys = keys.str()?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut first_rows = Vec::new();
    let mut row_groups = Vec::with_capacity(keys.len());
    for (row, value) in keys.into_iter().enumerate() {
        let group = value.map(|k| {
            *index.entry(k).or_insert_with(|| {
                first_rows.push(row as IdxSize);
                first_rows.len() - 1
            })
        });
        row_groups.push(group);
    }

    let excluded = row_groups.iter().filter(|g| g.is_none()).count();
    if excluded > 0 {
        tracing::warn!(stage = STAGE, key, excluded, "Excluded rows with a null key");
    }

    Ok(Groups {
        first_rows,
        row_groups,
    })
}
