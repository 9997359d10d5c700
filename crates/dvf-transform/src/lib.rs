//! Table stages of the DVF pipeline.
//!
//! Every stage takes the table by value and returns the transformed table:
//!
//! - [`drop_incomplete`]: null filter over mandatory and optional fields
//! - [`normalize_fields`]: categorical normalization and building type filter
//! - [`validate_range`] / [`validate_category`]: value checks
//! - [`group_by_mutation`]: one record per mutation

mod aggregate;
mod error;
mod frame;
mod normalization;
mod nulls;
mod validation;

pub use aggregate::{ADDITIVE_FIELDS, group_by_mutation, group_first_summing};
pub use error::{Result, TransformError};
pub use normalization::{
    canonicalize_search_type, lowercase_field, normalize_fields, retain_building_types,
};
pub use nulls::drop_incomplete;
pub use validation::{validate_category, validate_range};
