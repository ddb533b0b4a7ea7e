//! Result artifacts.
//!
//! | File | Columns | Written |
//! |------|---------|---------|
//! | `cells.csv` | `id, query_found` | always |
//! | `cellsout.csv` | `id, intLeft, intRight` | 2-D data only |
//! | `maxrank.csv` | `id, maxrank` | always |
//! | `maxrank_stats.csv` | `min, max, avg` | always |
//!
//! Files are written one after the other without any cross-file atomicity.
//! `query_found` holds a JSON array: `[[left, right], ...]` for interval
//! cells, the full weight vector of the first witness for vertex cells (or a
//! list of all of them with [`WitnessMode::All`]).

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accumulator::ResultTable;
use crate::cell::WitnessCells;
use crate::config::{RunConfig, WitnessMode};
use crate::error::{Error, Result};
use crate::point::PointId;

/// Cell artifact file name.
pub const CELLS_FILE: &str = "cells.csv";
/// Interval-exploded artifact file name.
pub const INTERVALS_FILE: &str = "cellsout.csv";
/// Rank artifact file name.
pub const RANKS_FILE: &str = "maxrank.csv";
/// Summary statistics artifact file name.
pub const STATS_FILE: &str = "maxrank_stats.csv";

/// Row of `cells.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRow {
    /// Query id.
    pub id: PointId,
    /// JSON-encoded witness cells.
    pub query_found: String,
}

/// Row of `cellsout.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRow {
    /// Query id.
    pub id: PointId,
    /// Lower weight bound.
    #[serde(rename = "intLeft")]
    pub int_left: f64,
    /// Upper weight bound.
    #[serde(rename = "intRight")]
    pub int_right: f64,
}

/// Row of `maxrank.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRow {
    /// Query id.
    pub id: PointId,
    /// Maximum rank.
    pub maxrank: usize,
}

/// Single row of `maxrank_stats.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankSummary {
    /// Smallest rank.
    pub min: usize,
    /// Largest rank.
    pub max: usize,
    /// Arithmetic mean rank.
    pub avg: f64,
}

impl RankSummary {
    /// Computes min, max and mean of `ranks`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResults`] when `ranks` is empty.
    pub fn from_ranks(ranks: &[usize]) -> Result<Self> {
        let min = ranks.iter().copied().min().ok_or(Error::EmptyResults)?;
        let max = ranks.iter().copied().max().ok_or(Error::EmptyResults)?;
        let avg = ranks.iter().map(|&r| r as f64).sum::<f64>() / ranks.len() as f64;
        Ok(Self { min, max, avg })
    }
}

/// Where the artifacts of a run were written.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    /// `cells.csv`.
    pub cells: PathBuf,
    /// `cellsout.csv`, for 2-D data.
    pub intervals: Option<PathBuf>,
    /// `maxrank.csv`.
    pub ranks: PathBuf,
    /// `maxrank_stats.csv`.
    pub stats: PathBuf,
}

/// Builds the `cells.csv` rows.
pub fn cell_rows(table: &ResultTable, witnesses: WitnessMode) -> Result<Vec<CellRow>> {
    table
        .iter()
        .map(|result| -> Result<CellRow> {
            let query_found = match (&result.cells, witnesses) {
                (WitnessCells::Interval(cells), _) => {
                    let bounds: Vec<[f64; 2]> = cells.iter().map(|c| c.bounds()).collect();
                    serde_json::to_string(&bounds)?
                }
                (WitnessCells::Vertex(cells), WitnessMode::First) => {
                    let first = cells.first().ok_or_else(|| {
                        Error::strategy("materialize", format!("no witness for '{}'", result.query_id))
                    })?;
                    serde_json::to_string(&first.full_weights())?
                }
                (WitnessCells::Vertex(cells), WitnessMode::All) => {
                    let all: Vec<Vec<f64>> = cells.iter().map(|c| c.full_weights()).collect();
                    serde_json::to_string(&all)?
                }
            };
            Ok(CellRow {
                id: result.query_id.clone(),
                query_found,
            })
        })
        .collect()
}

/// Flattens interval cells into one row per `(query, interval)`.
///
/// Vertex results contribute no rows.
pub fn interval_rows(table: &ResultTable) -> Vec<IntervalRow> {
    table
        .iter()
        .filter_map(|result| match &result.cells {
            WitnessCells::Interval(cells) => Some((result, cells)),
            WitnessCells::Vertex(_) => None,
        })
        .flat_map(|(result, cells)| {
            cells.iter().map(move |cell| IntervalRow {
                id: result.query_id.clone(),
                int_left: cell.left,
                int_right: cell.right,
            })
        })
        .collect()
}

/// Builds the `maxrank.csv` rows.
pub fn rank_rows(table: &ResultTable) -> Vec<RankRow> {
    table
        .iter()
        .map(|result| RankRow {
            id: result.query_id.clone(),
            maxrank: result.rank,
        })
        .collect()
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Writes every artifact of `table` into `config.output_dir` and returns the
/// summary it wrote alongside the file paths.
///
/// The summary is computed first, so an empty table fails before any file
/// is touched.
pub fn write_artifacts(
    table: &ResultTable,
    config: &RunConfig,
) -> Result<(RankSummary, ArtifactPaths)> {
    let summary = RankSummary::from_ranks(&table.ranks())?;

    let dir = &config.output_dir;
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let cells = dir.join(CELLS_FILE);
    write_rows(&cells, &cell_rows(table, config.witnesses)?)?;

    let intervals = if table.is_interval() {
        let path = dir.join(INTERVALS_FILE);
        write_rows(&path, &interval_rows(table))?;
        Some(path)
    } else {
        None
    };

    let ranks = dir.join(RANKS_FILE);
    write_rows(&ranks, &rank_rows(table))?;

    let stats = dir.join(STATS_FILE);
    write_rows(&stats, &[summary])?;

    info!(
        dir = %dir.display(),
        queries = table.len(),
        interval_rows = intervals.is_some(),
        "artifacts written"
    );

    let paths = ArtifactPaths {
        cells,
        intervals,
        ranks,
        stats,
    };
    Ok((summary, paths))
}
