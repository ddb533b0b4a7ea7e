//! # `MaxRank` Core
//!
//! Batch evaluation of the *maximum rank* of query records: the best position
//! a record can reach in a linear top-k ranking over all admissible attribute
//! weightings.
//!
//! The crate is organised as a straight pipeline:
//!
//! ```text
//! loader -> selector -> router (strategy) -> accumulator -> materialize
//! ```
//!
//! - **Loader**: CSV rows into [`Point`]s held by a [`Dataset`]
//! - **Selector**: resolves requested ids, fail-fast on unknown ids
//! - **Router**: picks [`PlanarSweep`] for 2-D data, [`VertexEnumeration`] or
//!   [`SimplexSampling`] above that, and tags the witness cells
//! - **Accumulator**: order-preserving [`ResultTable`]
//! - **Materialize**: `cells.csv`, `cellsout.csv`, `maxrank.csv`, `maxrank_stats.csv`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use maxrank_core::{Method, RunConfig, RunContext};
//!
//! let config = RunConfig::default();
//! let ctx = RunContext::load("data.csv", "queries.csv", config)?;
//! let report = ctx.execute(Method::Approximate)?;
//! println!("avg maxrank: {:.2}", report.summary.avg);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // usize counts averaged as f64
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod accumulator;
pub mod cell;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod loader;
pub mod materialize;
pub mod pipeline;
pub mod point;
pub mod router;
#[cfg(test)]
mod router_tests;
pub mod selector;
#[cfg(test)]
mod selector_tests;
pub mod strategy;

pub use accumulator::{RankResult, ResultTable};
pub use cell::{IntervalCell, VertexCell, WitnessCells};
pub use config::{ApproximateConfig, ConfigError, RunConfig, WitnessMode};
pub use error::{Error, ErrorKind, Result};
pub use materialize::{ArtifactPaths, CellRow, IntervalRow, RankRow, RankSummary};
pub use pipeline::{RunContext, RunReport};
pub use point::{Dataset, Point, PointId};
pub use router::{Method, Router};
pub use strategy::{
    PlanarSweep, RankStrategy, SimplexSampling, StrategyOutput, VertexEnumeration,
};
