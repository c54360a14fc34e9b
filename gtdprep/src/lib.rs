use std::path::PathBuf;

use log::{debug, info};
use polars::frame::DataFrame;

use crate::audit::MissingValueReport;
use crate::config::Config;
use crate::error::Result;
use crate::formatters::{write_output, OutputFormatter};

// Re-exports
pub use column_names as COL;

// Modules
pub mod audit;
pub mod column_names;
pub mod config;
pub mod country_names;
pub mod encoding;
pub mod error;
pub mod formatters;
pub mod loader;

/// Summary of a completed cleaning run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The first `preview_rows` rows as loaded, before any renaming
    pub preview: DataFrame,
    pub missing_values: MissingValueReport,
    pub rows_read: usize,
    pub rows_written: usize,
    /// Number of `country_txt` cells renamed
    pub countries_renamed: usize,
    pub output_path: PathBuf,
}

/// Type for the GTD cleaning pipeline
pub struct Pipeline {
    pub config: Config,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Pipeline {
    /// Setup the pipeline with custom configuration
    pub fn new(config: Config) -> Self {
        debug!("config: {config:?}");
        Self { config }
    }

    /// Reads the configured columns of the input file
    pub fn load(&self) -> Result<DataFrame> {
        loader::read_incidents(
            &self.config.input_path,
            self.config.encoding,
            &self.config.columns,
        )
    }

    /// The first `preview_rows` rows of `incidents`
    pub fn preview(&self, incidents: &DataFrame) -> DataFrame {
        incidents.head(Some(self.config.preview_rows))
    }

    /// Restricts `incidents` to the configured columns and renames countries. Returns the
    /// cleaned frame and the number of renamed country names.
    pub fn clean(&self, incidents: &DataFrame) -> Result<(DataFrame, usize)> {
        let mut cleaned = loader::restrict_columns(incidents, &self.config.columns)?;
        let countries_renamed = self.config.country_names.apply(&mut cleaned)?;
        info!("Renamed {countries_renamed} country names");
        Ok((cleaned, countries_renamed))
    }

    /// Loads and cleans the input without writing anything.
    pub fn prepare(&self) -> Result<DataFrame> {
        let (cleaned, _) = self.clean(&self.load()?)?;
        Ok(cleaned)
    }

    /// Cleans, audits and writes already loaded `incidents`. `preview` is carried into the
    /// outcome as is.
    pub fn finish(&self, incidents: DataFrame, preview: DataFrame) -> Result<PipelineOutcome> {
        let rows_read = incidents.height();
        let (mut cleaned, countries_renamed) = self.clean(&incidents)?;
        let missing_values = MissingValueReport::from_df(&cleaned);

        let output_path = self.config.output_path();
        let formatter: OutputFormatter = self.config.output_format.into();
        write_output(&formatter, &mut cleaned, &output_path)?;

        Ok(PipelineOutcome {
            preview,
            missing_values,
            rows_read,
            rows_written: cleaned.height(),
            countries_renamed,
            output_path,
        })
    }

    /// Runs the whole pipeline: load, preview, restrict columns, rename countries, audit and
    /// write.
    pub fn run(&self) -> Result<PipelineOutcome> {
        let incidents = self.load()?;
        let preview = self.preview(&incidents);
        self.finish(incidents, preview)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use polars::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::country_names::CountryNameMapping;
    use crate::error::GtdPrepError;

    /// Writes a small GTD-shaped latin-1 file with every selected column plus some extras, in a
    /// different order from the selection.
    fn write_gtd_fixture(dir: &Path) -> PathBuf {
        let mut header: Vec<&str> = COL::SELECTED.iter().rev().copied().collect();
        header.insert(3, "approxdate");
        header.push("summary");
        let rows: Vec<Vec<u8>> = [
            ("197000000001", "140", b"Ivory Coast".as_slice(), "1.0", "Abidjan"),
            ("197000000002", "217", b"United States".as_slice(), "", "Oakland"),
            ("197000000003", "130", b"Mexico".as_slice(), "0.0", ""),
            ("197000000004", "603", b"Cura\xe7ao".as_slice(), "", "Willemstad"),
        ]
        .into_iter()
        .map(|(eventid, country, country_txt, nkill, city)| {
            header
                .iter()
                .map(|column| match *column {
                    COL::EVENT_ID => eventid.as_bytes().to_vec(),
                    COL::COUNTRY => country.as_bytes().to_vec(),
                    COL::COUNTRY_TXT => country_txt.to_vec(),
                    COL::N_KILL => nkill.as_bytes().to_vec(),
                    COL::CITY => city.as_bytes().to_vec(),
                    COL::PROVSTATE | "approxdate" => vec![],
                    _ => b"1".to_vec(),
                })
                .collect::<Vec<_>>()
                .join(&b","[..])
        })
        .collect();

        let path = dir.join("globalterrorismdb_0718dist.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", header.join(",")).unwrap();
        for row in rows {
            file.write_all(&row).unwrap();
            file.write_all(b"\n").unwrap();
        }
        path
    }

    fn test_config(dir: &TempDir) -> Config {
        Config {
            input_path: write_gtd_fixture(dir.path()),
            output_path: Some(dir.path().join("cleaned_data.csv")),
            ..Config::default()
        }
    }

    fn read_output(path: &Path) -> DataFrame {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .unwrap()
            .finish()
            .unwrap()
    }

    fn str_column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn pipeline_should_clean_gtd_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let outcome = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(outcome.rows_read, 4);
        assert_eq!(outcome.rows_written, 4);
        assert_eq!(outcome.countries_renamed, 2);
        assert_eq!(outcome.preview.height(), 4);

        let output = read_output(&config.output_path());
        assert_eq!(
            output.get_column_names(),
            COL::SELECTED.to_vec(),
            "output columns should be the selection, in order"
        );
        assert_eq!(
            str_column(&output, COL::COUNTRY_TXT),
            vec![
                Some("Côte d'Ivoire".to_string()),
                Some("United States of America".to_string()),
                Some("Mexico".to_string()),
                Some("Curaçao".to_string()),
            ]
        );
        let countries: Vec<Option<i64>> = output
            .column(COL::COUNTRY)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(countries, vec![Some(140), Some(217), Some(130), Some(603)]);
        let event_ids: Vec<Option<i64>> = output
            .column(COL::EVENT_ID)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            event_ids,
            vec![
                Some(197000000001),
                Some(197000000002),
                Some(197000000003),
                Some(197000000004)
            ],
            "row order should be preserved"
        );
    }

    #[test]
    fn missing_values_are_counted_per_column() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = Pipeline::new(test_config(&dir)).run().unwrap();
        let report = outcome.missing_values;
        assert_eq!(report.get(COL::PROVSTATE), Some(4));
        assert_eq!(report.get(COL::N_KILL), Some(2));
        assert_eq!(report.get(COL::CITY), Some(1));
        assert_eq!(report.get(COL::COUNTRY_TXT), None);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn empty_mapping_keeps_country_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            country_names: CountryNameMapping::empty(),
            ..test_config(&dir)
        };
        let outcome = Pipeline::new(config.clone()).run().unwrap();
        assert_eq!(outcome.countries_renamed, 0);
        let output = read_output(&config.output_path());
        assert_eq!(
            str_column(&output, COL::COUNTRY_TXT)[0],
            Some("Ivory Coast".to_string())
        );
    }

    #[test]
    fn runs_should_be_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        Pipeline::new(config.clone()).run().unwrap();
        let first = std::fs::read(&config.output_path()).unwrap();
        Pipeline::new(config.clone()).run().unwrap();
        let second = std::fs::read(&config.output_path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_nkill_column_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gtd.csv");
        let header = COL::SELECTED
            .iter()
            .filter(|c| **c != COL::N_KILL)
            .copied()
            .collect::<Vec<_>>()
            .join(",");
        std::fs::write(&path, format!("{header}\n")).unwrap();
        let config = Config {
            input_path: path,
            output_path: Some(dir.path().join("cleaned_data.csv")),
            ..Config::default()
        };
        let result = Pipeline::new(config.clone()).run();
        assert!(matches!(
            result,
            Err(GtdPrepError::SchemaMismatch { ref missing }) if missing == &vec![COL::N_KILL.to_string()]
        ));
        assert!(!config.output_path().exists(), "nothing should be written");
    }

    #[test]
    fn preview_shows_names_as_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = Pipeline::new(test_config(&dir)).run().unwrap();
        assert_eq!(
            str_column(&outcome.preview, COL::COUNTRY_TXT)[0],
            Some("Ivory Coast".to_string()),
            "the preview is taken before country names are renamed"
        );
        assert_eq!(outcome.countries_renamed, 2);
    }

    #[test]
    fn preview_is_available_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: Some(dir.path().join("no_such_dir").join("cleaned_data.csv")),
            ..test_config(&dir)
        };
        let pipeline = Pipeline::new(config);
        let incidents = pipeline.load().unwrap();
        let preview = pipeline.preview(&incidents);
        assert_eq!(preview.height(), 4);
        let result = pipeline.finish(incidents, preview);
        assert!(matches!(result, Err(GtdPrepError::WriteFailure { .. })));
    }

    #[test]
    fn prepare_cleans_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let cleaned = Pipeline::new(config.clone()).prepare().unwrap();
        assert_eq!(cleaned.height(), 4);
        assert_eq!(
            str_column(&cleaned, COL::COUNTRY_TXT)[0],
            Some("Côte d'Ivoire".to_string())
        );
        assert!(!config.output_path().exists());
    }

    #[test]
    fn preview_is_limited_to_configured_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            preview_rows: 2,
            ..test_config(&dir)
        };
        let outcome = Pipeline::new(config).run().unwrap();
        assert_eq!(outcome.preview.height(), 2);
        assert_eq!(outcome.rows_written, 4);
    }
}
