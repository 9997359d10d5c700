//! Field normalization of the categorical columns.

use std::time::Instant;

use dvf_model::{canonical_search_type, fields, is_kept_building_type};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{map_text, require, retain};

const STAGE: &str = "normalize";

/// Lowercase `typeOfBuilding`, canonicalize `typeOfSearch`, then keep only
/// apartments and houses.
pub fn normalize_fields(df: DataFrame) -> Result<DataFrame> {
    let start = Instant::now();
    let rows_in = df.height();

    let df = lowercase_field(df, fields::TYPE_OF_BUILDING)?;
    let df = canonicalize_search_type(df)?;
    let df = retain_building_types(df)?;

    tracing::info!(
        stage = STAGE,
        rows_in,
        rows_out = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "Normalized categorical fields"
    );
    Ok(df)
}

/// Lowercase a text field. Nulls stay null.
pub fn lowercase_field(df: DataFrame, field: &str) -> Result<DataFrame> {
    map_text(df, field, STAGE, str::to_lowercase)
}

/// Lowercase `typeOfSearch` and apply the alias table.
pub fn canonicalize_search_type(df: DataFrame) -> Result<DataFrame> {
    map_text(df, fields::TYPE_OF_SEARCH, STAGE, |value| {
        canonical_search_type(&value.to_lowercase()).to_string()
    })
}

/// Keep records whose `typeOfBuilding` is a retained building type.
pub fn retain_building_types(df: DataFrame) -> Result<DataFrame> {
    let mask: BooleanChunked = require(&df, fields::TYPE_OF_BUILDING, STAGE)?
        .str()?
        .into_iter()
        .map(|value| value.is_some_and(is_kept_building_type))
        .collect();
    let rows_in = df.height();
    let df = retain(df, &mask)?;
    tracing::debug!(
        stage = STAGE,
        rows_in,
        rows_out = df.height(),
        "Filtered building types"
    );
    Ok(df)
}
