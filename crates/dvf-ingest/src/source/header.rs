//! Header resolution against the field mapping.

use std::path::Path;

use csv::StringRecord;
use dvf_model::SourceField;

use crate::error::{IngestError, Result};

/// Normalize a raw header cell: strip a UTF-8 BOM and surrounding spaces.
pub fn normalize_header(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

/// Position in the header of every mapped source column, in mapping order.
///
/// Extra columns are ignored. The first occurrence wins when a header
/// name is repeated.
pub fn resolve_columns(
    headers: &StringRecord,
    schema: &[SourceField],
    path: &Path,
) -> Result<Vec<usize>> {
    if headers.iter().all(|h| normalize_header(h).is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    schema
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| normalize_header(h) == field.source)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: field.source.to_string(),
                    path: path.to_path_buf(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvf_model::FieldType;

    const SCHEMA: &[SourceField] = &[
        SourceField::new("id_mutation", "idMutation", FieldType::Text),
        SourceField::new("valeur_fonciere", "price", FieldType::Float),
    ];

    #[test]
    fn resolves_positions_in_mapping_order() {
        let headers = StringRecord::from(vec!["valeur_fonciere", "other", "id_mutation"]);
        let positions = resolve_columns(&headers, SCHEMA, Path::new("x.csv")).unwrap();
        assert_eq!(positions, vec![2, 0]);
    }

    #[test]
    fn strips_bom() {
        let headers = StringRecord::from(vec!["\u{feff}id_mutation", " valeur_fonciere "]);
        let positions = resolve_columns(&headers, SCHEMA, Path::new("x.csv")).unwrap();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn missing_column_is_reported() {
        let headers = StringRecord::from(vec!["id_mutation"]);
        let err = resolve_columns(&headers, SCHEMA, Path::new("x.csv")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn { ref column, .. } if column == "valeur_fonciere"
        ));
    }
}
