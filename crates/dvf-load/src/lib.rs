//! Load step of the DVF pipeline.
//!
//! Hands the transformed file to `mongoimport`, then removes it unless the
//! request keeps it.

mod error;
mod import;

pub use error::{LoadError, Result};
pub use import::{
    ImportRequest, MONGOIMPORT, build_command, run_import, run_import_with,
};
