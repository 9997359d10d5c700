//! Configuration for a DVF pipeline run.
//!
//! A [`PipelineConfig`] is built once from the command line and handed to
//! every stage by reference. Nothing in the pipeline mutates it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::fields;

/// Default bounds for `price`, exclusive on both ends.
pub const DEFAULT_PRICE_BOUNDS: Bounds = Bounds {
    lower: 4999.0,
    upper: 1_999_999.0,
};

/// Default bounds for `surface`, exclusive on both ends.
pub const DEFAULT_SURFACE_BOUNDS: Bounds = Bounds {
    lower: 9.0,
    upper: 1001.0,
};

/// Base URL of the DVF yearly exports.
pub const DVF_BASE_URL: &str = "https://cadastre.data.gouv.fr/data/etalab-dvf/latest/csv";

/// Exclusive numeric range: a value is kept when `lower < value < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Build bounds, rejecting an empty range.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(ModelError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Whether `value` lies strictly inside the range.
    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }
}

/// Null-handling field groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroups {
    /// A record missing any of these is dropped.
    pub mandatory: Vec<String>,
    /// A record missing all of these is dropped.
    pub optional: Vec<String>,
}

impl Default for FieldGroups {
    fn default() -> Self {
        Self {
            mandatory: vec![fields::TYPE_OF_SEARCH.to_string(), fields::PRICE.to_string()],
            optional: vec![
                fields::TYPE_OF_BUILDING.to_string(),
                fields::SURFACE.to_string(),
                fields::NB_ROOM.to_string(),
            ],
        }
    }
}

/// Serialized representation of the transformed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Comma-delimited text with a header row and a leading row index.
    #[default]
    Csv,
    /// JSON array with one document per record.
    Json,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// How date fields are rendered in document output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRendering {
    /// Plain ISO-8601 string.
    #[default]
    Iso,
    /// `{"$date": "<iso>"}`, the document database's native date on import.
    DateEnvelope,
}

/// Immutable configuration of one ETL run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// DVF year to process.
    pub year: u16,
    /// Directory holding downloaded and transformed files.
    pub data_dir: PathBuf,
    /// Target database for the load step.
    pub database: Option<String>,
    /// Target collection for the load step.
    pub collection: Option<String>,
    /// Drop the collection before importing.
    pub replace: bool,
    /// Verbose output from external tools.
    pub verbose: bool,
    /// Persist the transformed table.
    pub save: bool,
    pub output_format: OutputFormat,
    pub date_rendering: DateRendering,
    pub price_bounds: Bounds,
    pub surface_bounds: Bounds,
    pub field_groups: FieldGroups,
}

impl PipelineConfig {
    /// Configuration with defaults for everything but the year.
    pub fn new(year: u16) -> Self {
        Self {
            year,
            data_dir: PathBuf::from("data"),
            database: None,
            collection: None,
            replace: false,
            verbose: false,
            save: false,
            output_format: OutputFormat::default(),
            date_rendering: DateRendering::default(),
            price_bounds: DEFAULT_PRICE_BOUNDS,
            surface_bounds: DEFAULT_SURFACE_BOUNDS,
            field_groups: FieldGroups::default(),
        }
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, database: impl Into<String>, collection: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_date_rendering(mut self, rendering: DateRendering) -> Self {
        self.date_rendering = rendering;
        self
    }

    #[must_use]
    pub fn with_price_bounds(mut self, bounds: Bounds) -> Self {
        self.price_bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_surface_bounds(mut self, bounds: Bounds) -> Self {
        self.surface_bounds = bounds;
        self
    }

    /// URL of the yearly gzip export.
    pub fn download_url(&self) -> String {
        format!("{DVF_BASE_URL}/{}/full.csv.gz", self.year)
    }

    /// Downloaded archive: `<data_dir>/dvf_<year>.csv.gz`.
    pub fn archive_path(&self) -> PathBuf {
        self.data_file(&format!("dvf_{}.csv.gz", self.year))
    }

    /// Decompressed source: `<data_dir>/dvf_<year>.csv`.
    pub fn source_path(&self) -> PathBuf {
        self.data_file(&format!("dvf_{}.csv", self.year))
    }

    /// Transformed output: `<data_dir>/dvf_<year>_updated.<ext>`.
    pub fn output_path(&self) -> PathBuf {
        self.data_file(&format!(
            "dvf_{}_updated.{}",
            self.year,
            self.output_format.extension()
        ))
    }

    /// Database and collection, required by the load step.
    pub fn load_target(&self) -> Result<(&str, &str)> {
        let database = self
            .database
            .as_deref()
            .ok_or(ModelError::MissingValue("database"))?;
        let collection = self
            .collection
            .as_deref()
            .ok_or(ModelError::MissingValue("collection"))?;
        Ok((database, collection))
    }

    fn data_file(&self, name: &str) -> PathBuf {
        Path::new(&self.data_dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_exclusive() {
        assert!(!DEFAULT_PRICE_BOUNDS.contains(4999.0));
        assert!(DEFAULT_PRICE_BOUNDS.contains(5000.0));
        assert!(DEFAULT_PRICE_BOUNDS.contains(1_999_998.0));
        assert!(!DEFAULT_PRICE_BOUNDS.contains(1_999_999.0));
    }

    #[test]
    fn empty_bounds_are_rejected() {
        assert!(Bounds::new(10.0, 10.0).is_err());
        assert!(Bounds::new(11.0, 10.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
        assert!(Bounds::new(9.0, 10.0).is_ok());
    }

    #[test]
    fn paths_follow_year() {
        let config = PipelineConfig::new(2021).with_data_dir("/tmp/dvf");
        assert_eq!(config.source_path(), PathBuf::from("/tmp/dvf/dvf_2021.csv"));
        assert_eq!(
            config.archive_path(),
            PathBuf::from("/tmp/dvf/dvf_2021.csv.gz")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("/tmp/dvf/dvf_2021_updated.csv")
        );
        let json = config.with_output_format(OutputFormat::Json);
        assert_eq!(
            json.output_path(),
            PathBuf::from("/tmp/dvf/dvf_2021_updated.json")
        );
    }

    #[test]
    fn load_target_requires_both_names() {
        let config = PipelineConfig::new(2021);
        assert_eq!(
            config.load_target(),
            Err(ModelError::MissingValue("database"))
        );
        let config = config.with_target("dvf", "transactions");
        assert_eq!(config.load_target(), Ok(("dvf", "transactions")));
    }
}
