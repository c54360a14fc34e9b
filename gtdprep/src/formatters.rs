use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use anyhow::Context;
use enum_dispatch::enum_dispatch;
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{GtdPrepError, Result};

/// Defines the output formats we are able to write the cleaned data in.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, EnumString, Display, PartialEq, Eq,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    /// File extension used for the default output path
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl From<OutputFormat> for OutputFormatter {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Csv => OutputFormatter::Csv(CSVFormatter),
            OutputFormat::Parquet => OutputFormatter::Parquet(ParquetFormatter),
        }
    }
}

/// Trait to define different output generators. Defines two
/// functions, format which generates a serialized string of the
/// `DataFrame` and save which writes the serialized frame to a writer
#[enum_dispatch]
pub trait OutputGenerator {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()>;
    fn format(&self, df: &mut DataFrame) -> Result<String> {
        let mut data: Vec<u8> = vec![];
        let mut buff = Cursor::new(&mut data);
        self.save(&mut buff, df)?;

        Ok(String::from_utf8(data).context("Output is not valid UTF-8")?)
    }
}

/// Enum of OutputFormatters one for each potential
/// output type
#[enum_dispatch(OutputGenerator)]
#[derive(Debug)]
pub enum OutputFormatter {
    Csv(CSVFormatter),
    Parquet(ParquetFormatter),
}

/// Format the results as a UTF-8 CSV file with a header row and
/// no row-index column
#[derive(Debug, Default)]
pub struct CSVFormatter;

impl OutputGenerator for CSVFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        CsvWriter::new(writer).include_header(true).finish(df)?;
        Ok(())
    }
}

/// Format the results as a zstd compressed parquet file
#[derive(Debug, Default)]
pub struct ParquetFormatter;

impl OutputGenerator for ParquetFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        ParquetWriter::new(writer)
            .with_compression(ParquetCompression::Zstd(None))
            .finish(df)?;
        Ok(())
    }
}

/// Creates (or truncates) `path` and writes `df` to it with `output_generator`. Any failure
/// after the path is known is reported as a `WriteFailure` for that path.
pub fn write_output<T, P>(output_generator: &T, df: &mut DataFrame, path: P) -> Result<()>
where
    T: OutputGenerator,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_failure = |source: Box<dyn std::error::Error + Send + Sync>| {
        GtdPrepError::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    };
    let file = File::create(path).map_err(|err| write_failure(err.into()))?;
    let mut writer = BufWriter::new(file);
    output_generator
        .save(&mut writer, df)
        .map_err(|err| write_failure(err.into()))?;
    writer.flush().map_err(|err| write_failure(err.into()))?;
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
