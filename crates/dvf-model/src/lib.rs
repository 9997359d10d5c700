//! Model definitions shared by the DVF pipeline crates.
//!
//! - **schema**: source to canonical field mapping and declared types
//! - **options**: the immutable [`PipelineConfig`] and its parts
//! - **vocabulary**: controlled terms of the categorical fields

pub mod error;
pub mod options;
pub mod schema;
pub mod vocabulary;

pub use error::{ModelError, Result};
pub use options::{
    Bounds, DEFAULT_PRICE_BOUNDS, DEFAULT_SURFACE_BOUNDS, DVF_BASE_URL, DateRendering,
    FieldGroups, OutputFormat, PipelineConfig,
};
pub use schema::{
    DVF_SCHEMA, FieldType, SOURCE_DATE_FORMAT, SourceField, canonical_names, fields,
    find_canonical, validate_schema,
};
pub use vocabulary::{
    BUILDING_TYPES, SEARCH_TYPE, SEARCH_TYPE_ALIASES, canonical_search_type,
    is_kept_building_type,
};
