//! Range and category validation.

use std::time::Instant;

use dvf_model::Bounds;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{as_f64, require, retain};

const STAGE: &str = "validate";

/// Keep records whose `field` lies strictly between the bounds.
///
/// Null values are dropped. Integer columns are compared as floats.
pub fn validate_range(df: DataFrame, field: &str, bounds: Bounds) -> Result<DataFrame> {
    let start = Instant::now();
    let rows_in = df.height();

    let values = as_f64(require(&df, field, STAGE)?)?;
    let mask: BooleanChunked = values
        .into_iter()
        .map(|value| value.is_some_and(|v| bounds.contains(v)))
        .collect();
    let df = retain(df, &mask)?;

    tracing::info!(
        stage = STAGE,
        field,
        lower = bounds.lower,
        upper = bounds.upper,
        rows_in,
        rows_out = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "Validated value range"
    );
    Ok(df)
}

/// Keep records whose text `field` equals `expected` exactly.
pub fn validate_category(df: DataFrame, field: &str, expected: &str) -> Result<DataFrame> {
    let rows_in = df.height();
    let mask: BooleanChunked = require(&df, field, STAGE)?
        .str()?
        .into_iter()
        .map(|value| value == Some(expected))
        .collect();
    let df = retain(df, &mask)?;

    tracing::info!(
        stage = STAGE,
        field,
        expected,
        rows_in,
        rows_out = df.height(),
        "Validated category"
    );
    Ok(df)
}
