//! DataFrame helpers shared by the stages.

use polars::prelude::*;

use crate::error::{Result, TransformError};

/// Look up a column, reporting its absence as a stage error.
pub(crate) fn require<'a>(df: &'a DataFrame, field: &str, stage: &'static str) -> Result<&'a Column> {
    df.column(field).map_err(|_| {
        tracing::error!(stage, field, "Field not found");
        TransformError::FieldNotFound {
            field: field.to_string(),
            stage,
        }
    })
}

/// Keep the rows selected by `mask`.
pub(crate) fn retain(df: DataFrame, mask: &BooleanChunked) -> Result<DataFrame> {
    if mask.all() {
        return Ok(df);
    }
    Ok(df.filter(mask)?)
}

/// Float view of a column, for numeric comparisons.
pub(crate) fn as_f64(column: &Column) -> Result<Float64Chunked> {
    Ok(column.cast(&DataType::Float64)?.f64()?.clone())
}

/// Replace a text column with `f` applied to its non-null values.
pub(crate) fn map_text(
    mut df: DataFrame,
    field: &str,
    stage: &'static str,
    f: impl Fn(&str) -> String,
) -> Result<DataFrame> {
    let values: Vec<Option<String>> = require(&df, field, stage)?
        .str()?
        .into_iter()
        .map(|value| value.map(&f))
        .collect();
    df.with_column(Series::new(field.into(), values))?;
    Ok(df)
}
