//! Canonical schema of the DVF transaction table.
//!
//! The source file carries French column names. The pipeline works on a
//! fixed set of canonical names, produced by an explicit source to
//! canonical mapping rather than by column position.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ModelError, Result};

/// Canonical field names.
pub mod fields {
    pub const ID_MUTATION: &str = "idMutation";
    pub const CREATED_AT: &str = "createdAt";
    pub const TYPE_OF_SEARCH: &str = "typeOfSearch";
    pub const PRICE: &str = "price";
    pub const STREET_NUMBER: &str = "streetNumber";
    pub const HOUSE_NUMBER: &str = "houseNumber";
    pub const STREET_NAME: &str = "streetName";
    pub const POSTAL_CODE: &str = "postalCode";
    pub const CITY: &str = "city";
    pub const DEPARTEMENT: &str = "departement";
    pub const TYPE_OF_BUILDING: &str = "typeOfBuilding";
    pub const SURFACE: &str = "surface";
    pub const NB_ROOM: &str = "nbRoom";
    pub const LONGITUDE: &str = "longitude";
    pub const LATITUDE: &str = "latitude";
}

/// Date format used by the `date_mutation` source column.
pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Declared type of a loaded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Free text, kept as-is after trimming.
    Text,
    /// 64-bit float.
    Float,
    /// Integer that may be absent (empty cell).
    NullableInt,
    /// Calendar date parsed with the given `chrono` format.
    Date { format: &'static str },
}

impl FieldType {
    /// Short name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Float => "float",
            Self::NullableInt => "integer",
            Self::Date { .. } => "date",
        }
    }
}

/// One entry of the source to canonical mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceField {
    /// Column name in the source file.
    pub source: &'static str,
    /// Column name in the pipeline table.
    pub canonical: &'static str,
    /// Type the raw value is coerced to.
    pub field_type: FieldType,
}

impl SourceField {
    pub const fn new(source: &'static str, canonical: &'static str, field_type: FieldType) -> Self {
        Self {
            source,
            canonical,
            field_type,
        }
    }
}

/// Fields loaded from a DVF yearly file, in canonical order.
pub const DVF_SCHEMA: &[SourceField] = &[
    SourceField::new("id_mutation", fields::ID_MUTATION, FieldType::Text),
    SourceField::new(
        "date_mutation",
        fields::CREATED_AT,
        FieldType::Date {
            format: SOURCE_DATE_FORMAT,
        },
    ),
    SourceField::new("nature_mutation", fields::TYPE_OF_SEARCH, FieldType::Text),
    SourceField::new("valeur_fonciere", fields::PRICE, FieldType::Float),
    SourceField::new("adresse_numero", fields::STREET_NUMBER, FieldType::NullableInt),
    SourceField::new("adresse_suffixe", fields::HOUSE_NUMBER, FieldType::Text),
    SourceField::new("adresse_nom_voie", fields::STREET_NAME, FieldType::Text),
    SourceField::new("code_postal", fields::POSTAL_CODE, FieldType::Text),
    SourceField::new("nom_commune", fields::CITY, FieldType::Text),
    SourceField::new("code_departement", fields::DEPARTEMENT, FieldType::Text),
    SourceField::new("type_local", fields::TYPE_OF_BUILDING, FieldType::Text),
    SourceField::new("surface_reelle_bati", fields::SURFACE, FieldType::Float),
    SourceField::new(
        "nombre_pieces_principales",
        fields::NB_ROOM,
        FieldType::Float,
    ),
    SourceField::new("longitude", fields::LONGITUDE, FieldType::Text),
    SourceField::new("latitude", fields::LATITUDE, FieldType::Text),
];

/// Check that a mapping is usable: no empty names, no duplicate source
/// columns, no duplicate canonical fields.
pub fn validate_schema(schema: &[SourceField]) -> Result<()> {
    let mut sources = HashSet::with_capacity(schema.len());
    let mut canonicals = HashSet::with_capacity(schema.len());
    for (index, field) in schema.iter().enumerate() {
        if field.source.trim().is_empty() {
            return Err(ModelError::EmptyFieldName {
                index,
                side: "source",
            });
        }
        if field.canonical.trim().is_empty() {
            return Err(ModelError::EmptyFieldName {
                index,
                side: "canonical",
            });
        }
        if !sources.insert(field.source) {
            return Err(ModelError::DuplicateSourceField {
                name: field.source.to_string(),
            });
        }
        if !canonicals.insert(field.canonical) {
            return Err(ModelError::DuplicateCanonicalField {
                name: field.canonical.to_string(),
            });
        }
    }
    Ok(())
}

/// Canonical names of a mapping, in order.
pub fn canonical_names(schema: &[SourceField]) -> Vec<&'static str> {
    schema.iter().map(|field| field.canonical).collect()
}

/// Look up the mapping entry producing a canonical field.
pub fn find_canonical<'a>(schema: &'a [SourceField], canonical: &str) -> Option<&'a SourceField> {
    schema.iter().find(|field| field.canonical == canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dvf_schema_is_valid() {
        assert_eq!(validate_schema(DVF_SCHEMA), Ok(()));
        assert_eq!(DVF_SCHEMA.len(), 15);
    }

    #[test]
    fn duplicate_canonical_is_rejected() {
        let schema = [
            SourceField::new("a", "x", FieldType::Text),
            SourceField::new("b", "x", FieldType::Float),
        ];
        assert_eq!(
            validate_schema(&schema),
            Err(ModelError::DuplicateCanonicalField {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn empty_source_is_rejected() {
        let schema = [SourceField::new(" ", "x", FieldType::Text)];
        assert!(matches!(
            validate_schema(&schema),
            Err(ModelError::EmptyFieldName { index: 0, .. })
        ));
    }
}
