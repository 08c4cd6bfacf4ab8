use std::path::{Path, PathBuf};

use crate::BatchError;

/// Everything a hash job needs, validated once before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashJobConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub email_column: String,
    pub keep_columns: Vec<String>,
}

impl HashJobConfig {
    /// Builds a configuration from command line values.
    ///
    /// `keep_columns` is the raw comma-separated list; see [`parse_keep_columns`].
    /// The email column is used verbatim and must match the input header exactly.
    ///
    /// # Errors
    /// `BatchError::Configuration` when the email column is blank or when the
    /// output path is the input path.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        email_column: &str,
        keep_columns: &str,
    ) -> Result<Self, BatchError> {
        let config = Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            email_column: email_column.to_owned(),
            keep_columns: parse_keep_columns(keep_columns),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if self.email_column.trim().is_empty() {
            return Err(BatchError::Configuration(
                "email column name must not be empty".to_owned(),
            ));
        }

        if same_file(&self.input_path, &self.output_path) {
            return Err(BatchError::Configuration(format!(
                "output path {} is the input path",
                self.output_path.display()
            )));
        }

        Ok(())
    }
}

/// Splits a comma-separated column list, trimming each name.
///
/// Blank entries are kept as columns with an empty name.
///
/// ```
/// use csv_email_hash::config::parse_keep_columns;
///
/// assert_eq!(parse_keep_columns(" start date , end date"), vec!["start date", "end date"]);
/// assert_eq!(parse_keep_columns("city,"), vec!["city", ""]);
/// ```
pub fn parse_keep_columns(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).map(str::to_owned).collect()
}

fn same_file(left: &Path, right: &Path) -> bool {
    match (left.canonicalize(), right.canonicalize()) {
        (Ok(left), Ok(right)) => left == right,
        _ => left == right,
    }
}
