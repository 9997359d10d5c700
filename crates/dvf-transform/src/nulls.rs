//! Null filter.
//!
//! A record survives when every mandatory field is present and at least one
//! optional field is present. A field missing from the table counts as null
//! on every row.

use std::time::Instant;

use dvf_model::FieldGroups;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::retain;

const STAGE: &str = "null_filter";

/// Drop incomplete records.
pub fn drop_incomplete(df: DataFrame, groups: &FieldGroups) -> Result<DataFrame> {
    let start = Instant::now();
    let rows_in = df.height();

    let mask = completeness_mask(&df, groups);
    let df = retain(df, &mask)?;

    tracing::info!(
        stage = STAGE,
        rows_in,
        rows_out = df.height(),
        dropped = rows_in - df.height(),
        duration_ms = start.elapsed().as_millis(),
        "Dropped incomplete records"
    );
    Ok(df)
}

fn completeness_mask(df: &DataFrame, groups: &FieldGroups) -> BooleanChunked {
    let height = df.height();
    let mut mask = BooleanChunked::full("mask".into(), true, height);

    for field in &groups.mandatory {
        match df.column(field) {
            Ok(column) => mask = &mask & &column.is_not_null(),
            Err(_) => {
                tracing::warn!(stage = STAGE, field = %field, "Mandatory field absent, dropping all rows");
                mask = BooleanChunked::full("mask".into(), false, height);
            }
        }
    }

    // An empty optional group places no constraint.
    if !groups.optional.is_empty() {
        let mut any_present = BooleanChunked::full("optional".into(), false, height);
        for field in &groups.optional {
            if let Ok(column) = df.column(field) {
                any_present = &any_present | &column.is_not_null();
            }
        }
        mask = &mask & &any_present;
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df! {
            "typeOfSearch" => [Some("Vente"), None, Some("Vente"), Some("Vente")],
            "price" => [Some(100_000.0), Some(100_000.0), None, Some(100_000.0)],
            "typeOfBuilding" => [None::<&str>, Some("Maison"), Some("Maison"), None],
            "surface" => [None, Some(40.0), Some(40.0), None],
            "nbRoom" => [None, Some(2.0), None, Some(3.0)],
        }
        .unwrap()
    }

    #[test]
    fn drops_missing_mandatory_and_all_null_optional() {
        let df = drop_incomplete(sample(), &FieldGroups::default()).unwrap();
        // Row 0: optional all null. Row 1: typeOfSearch null. Row 2: price null.
        assert_eq!(df.height(), 1);
        let rooms = df.column("nbRoom").unwrap().f64().unwrap();
        assert_eq!(rooms.get(0), Some(3.0));
    }

    #[test]
    fn absent_mandatory_drops_everything() {
        let df = sample().drop("price").unwrap();
        let df = drop_incomplete(df, &FieldGroups::default()).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn absent_optional_contributes_nothing() {
        let df = sample().drop("nbRoom").unwrap();
        let df = drop_incomplete(df, &FieldGroups::default()).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn empty_optional_group_keeps_complete_rows() {
        let groups = FieldGroups {
            mandatory: vec!["typeOfSearch".to_string(), "price".to_string()],
            optional: Vec::new(),
        };
        let df = drop_incomplete(sample(), &groups).unwrap();
        assert_eq!(df.height(), 2);
    }
}
