use std::io::{Cursor, ErrorKind};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use itertools::Itertools;
use log::{debug, info};
use polars::prelude::*;

use crate::encoding::SourceEncoding;
use crate::error::{GtdPrepError, Result};

/// Reads a whole GTD export into memory, decoding it with `encoding` and keeping only `columns`.
///
/// The header is checked before any rows are parsed: a declared column that is absent from the
/// file is an error rather than a column of nulls. Columns in the file but not in `columns` are
/// dropped. The returned frame has `columns` in the declared order.
pub fn read_incidents<P: AsRef<Path>>(
    path: P,
    encoding: SourceEncoding,
    columns: &[String],
) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Reading {} as {encoding}", path.display());
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => GtdPrepError::InputNotFound(path.to_path_buf()),
        _ => GtdPrepError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let text = encoding.decode(&bytes).ok_or_else(|| GtdPrepError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    })?;

    let header = read_header(&text)?;
    let projection = header_projection(&header, columns)?;
    debug!("projection: {projection:?}");

    let df = CsvReadOptions::default()
        .with_has_header(true)
        // Infer over the whole file, later rows in the GTD export change type
        .with_infer_schema_length(None)
        .with_projection(Some(Arc::new(projection)))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()?;
    info!("Read {} rows", df.height());
    restrict_columns(&df, columns)
}

/// Returns a frame holding exactly `columns`, in that order.
pub fn restrict_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    Ok(df.select(columns.iter().map(String::as_str))?)
}

fn read_header(text: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()
        .context("Failed to parse the header row")?
        .iter()
        .map(str::to_string)
        .collect();
    Ok(header)
}

/// Maps the declared columns to their (ascending) positions in `header`.
fn header_projection(header: &[String], columns: &[String]) -> Result<Vec<usize>> {
    let (found, missing): (Vec<_>, Vec<_>) = columns
        .iter()
        .map(|column| (column, header.iter().position(|h| h == column)))
        .partition(|(_, idx)| idx.is_some());
    if !missing.is_empty() {
        return Err(GtdPrepError::SchemaMismatch {
            missing: missing.into_iter().map(|(c, _)| c.clone()).collect(),
        });
    }
    Ok(found
        .into_iter()
        .filter_map(|(_, idx)| idx)
        .sorted()
        .dedup()
        .collect())
}
