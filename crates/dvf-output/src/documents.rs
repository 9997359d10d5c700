//! JSON document output.
//!
//! The table becomes an array with one object per record. Keys are the
//! column names, nulls are kept, dates render as ISO-8601 UTC midnight,
//! optionally wrapped in a `$date` envelope.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dvf_common::{date_from_days, iso_datetime_utc};
use dvf_model::DateRendering;
use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Map, Number, Value};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Build one JSON object per record.
pub fn documents(df: &DataFrame, rendering: DateRendering) -> Result<Vec<Value>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df.get_columns();

    let mut docs = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut doc = Map::new();
        for (name, column) in names.iter().zip(columns) {
            doc.insert(name.clone(), json_value(column.get(row)?, rendering));
        }
        docs.push(Value::Object(doc));
    }
    Ok(docs)
}

/// Write the table as a JSON array, replacing any existing file.
pub fn write_json(df: &DataFrame, path: &Path, rendering: DateRendering) -> Result<()> {
    let docs = documents(df, rendering)?;
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| OutputError::write_failed(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &docs).map_err(|e| OutputError::write_failed(path, e))?;
    writer.flush().map_err(|e| OutputError::write_failed(path, e))?;
    Ok(())
}

fn json_value(value: AnyValue<'_>, rendering: DateRendering) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_value(f64::from(v)),
        AnyValue::Float64(v) => float_value(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => match date_from_days(days) {
            Some(date) => date_value(iso_datetime_utc(date), rendering),
            None => Value::Null,
        },
        other => Value::String(other.to_string()),
    }
}

// Whole floats serialize as integers, matching the delimited output.
fn float_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        return Value::from(v as i64);
    }
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

fn date_value(iso: String, rendering: DateRendering) -> Value {
    match rendering {
        DateRendering::Iso => Value::String(iso),
        DateRendering::DateEnvelope => {
            let mut envelope = Map::new();
            envelope.insert("$date".to_string(), Value::String(iso));
            Value::Object(envelope)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn dated() -> DataFrame {
        let created = Series::new("createdAt".into(), [Some(18_700i32), None])
            .cast(&DataType::Date)
            .unwrap();
        DataFrame::new(vec![
            Series::new("idMutation".into(), ["2021-1", "2021-2"]).into(),
            created.into(),
            Series::new("price".into(), [250_000.0, 1234.5]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn iso_dates_and_kept_nulls() {
        let docs = documents(&dated(), DateRendering::Iso).unwrap();
        assert_eq!(
            docs[0],
            serde_json::json!({
                "idMutation": "2021-1",
                "createdAt": "2021-03-14T00:00:00.000Z",
                "price": 250000,
            })
        );
        assert_eq!(docs[1]["createdAt"], Value::Null);
        assert_eq!(docs[1]["price"], serde_json::json!(1234.5));
    }

    #[test]
    fn date_envelope() {
        let docs = documents(&dated(), DateRendering::DateEnvelope).unwrap();
        assert_eq!(
            docs[0]["createdAt"],
            serde_json::json!({ "$date": "2021-03-14T00:00:00.000Z" })
        );
    }

    #[test]
    fn nan_becomes_null() {
        assert_eq!(float_value(f64::NAN), Value::Null);
        assert_eq!(float_value(65.0), serde_json::json!(65));
    }
}
