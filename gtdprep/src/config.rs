use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::country_names::CountryNameMapping;
use crate::encoding::SourceEncoding;
use crate::formatters::OutputFormat;

/// Number of rows shown in the preview of the loaded data
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// File stem of the output when no `output_path` is configured
pub const DEFAULT_OUTPUT_STEM: &str = "cleaned_data";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    /// Defaults to `cleaned_data` with the extension of `output_format`
    pub output_path: Option<PathBuf>,
    pub encoding: SourceEncoding,
    pub columns: Vec<String>,
    pub preview_rows: usize,
    pub country_names: CountryNameMapping,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: "globalterrorismdb_0718dist.csv".into(),
            output_path: None,
            encoding: SourceEncoding::default(),
            columns: crate::COL::selected(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            country_names: CountryNameMapping::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// The path the cleaned data is written to
    pub fn output_path(&self) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(self.output_format.extension())
        })
    }
}
