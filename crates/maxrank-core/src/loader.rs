//! CSV loaders for the dataset and query files.
//!
//! Both files carry a header row and use their first column as the record id.
//! The dataset's remaining columns are the (already normalised) attributes;
//! the query file's remaining columns are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::point::{Dataset, Point, PointId};

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(BufReader::with_capacity(128 * 1024, file))
}

fn reader_builder(delimiter: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter);
    builder
}

fn record_id(record: &StringRecord, row: usize) -> Result<PointId> {
    match record.get(0) {
        Some(id) if !id.is_empty() => Ok(PointId::new(id)),
        _ => Err(Error::MissingId(row)),
    }
}

/// Loads the dataset file.
pub fn load_dataset(path: impl AsRef<Path>, config: &RunConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let dataset = read_dataset(open(path)?, config.delimiter_byte())?;
    debug!(
        path = %path.display(),
        records = dataset.len(),
        dimension = dataset.dimension(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parses a dataset from any CSV source.
pub fn read_dataset<R: Read>(source: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = reader_builder(delimiter).from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::MalformedRow {
            row: 0,
            message: "missing header row".to_string(),
        });
    }
    let dimension = headers.len() - 1;

    let mut points = Vec::new();
    for (pos, record) in reader.records().enumerate() {
        let row = pos + 1;
        let record = record?;

        let id = record_id(&record, row)?;
        if record.len() != headers.len() {
            return Err(Error::DimensionMismatch {
                row,
                expected: dimension,
                actual: record.len().saturating_sub(1),
            });
        }

        let coords = record
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, field)| parse_coordinate(field, row, &headers, col))
            .collect::<Result<Vec<f64>>>()?;

        points.push(Point::new(id, coords));
    }

    Dataset::new(points, dimension)
}

fn parse_coordinate(field: &str, row: usize, headers: &StringRecord, col: usize) -> Result<f64> {
    let column = headers.get(col).unwrap_or_default();
    let value: f64 = field.parse().map_err(|_| Error::MalformedRow {
        row,
        message: format!("column '{column}': '{field}' is not a number"),
    })?;
    if !value.is_finite() {
        return Err(Error::MalformedRow {
            row,
            message: format!("column '{column}': '{field}' is not finite"),
        });
    }
    Ok(value)
}

/// Loads the query file.
pub fn load_queries(path: impl AsRef<Path>, config: &RunConfig) -> Result<Vec<PointId>> {
    let path = path.as_ref();
    let queries = read_queries(open(path)?, config.delimiter_byte())?;
    debug!(path = %path.display(), queries = queries.len(), "queries loaded");
    Ok(queries)
}

/// Parses query ids from any CSV source, keeping file order and duplicates.
pub fn read_queries<R: Read>(source: R, delimiter: u8) -> Result<Vec<PointId>> {
    let mut reader = reader_builder(delimiter).from_reader(source);

    reader
        .records()
        .enumerate()
        .map(|(pos, record)| record_id(&record?, pos + 1))
        .collect()
}
