//! Run orchestration: load, select, route, accumulate, materialize.

use std::path::Path;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::info;

use crate::accumulator::ResultTable;
use crate::config::RunConfig;
use crate::error::Result;
use crate::loader::{load_dataset, load_queries};
use crate::materialize::{write_artifacts, ArtifactPaths, RankSummary};
use crate::point::{Dataset, PointId};
use crate::router::{Method, Router};
use crate::selector::select;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Per-query results in query order.
    pub table: ResultTable,
    /// Rank statistics.
    pub summary: RankSummary,
    /// Written files.
    pub artifacts: ArtifactPaths,
    /// Strategy every query went through.
    pub strategy: &'static str,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Everything one batch run needs, passed explicitly through the stages.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: RunConfig,
    dataset: Dataset,
    queries: Vec<PointId>,
}

impl RunContext {
    /// Creates a context from in-memory inputs.
    #[must_use]
    pub fn new(config: RunConfig, dataset: Dataset, queries: Vec<PointId>) -> Self {
        Self {
            config,
            dataset,
            queries,
        }
    }

    /// Loads the dataset and query files.
    pub fn load(
        data_path: impl AsRef<Path>,
        query_path: impl AsRef<Path>,
        config: RunConfig,
    ) -> Result<Self> {
        config.validate()?;
        let dataset = load_dataset(data_path, &config)?;
        let queries = load_queries(query_path, &config)?;
        Ok(Self::new(config, dataset, queries))
    }

    /// Loaded dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Requested query ids, in file order.
    #[must_use]
    pub fn queries(&self) -> &[PointId] {
        &self.queries
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Resolves a method selector against the loaded data.
    ///
    /// 2-D data always goes through the planar sweep, so the selector is not
    /// looked at there.
    pub fn resolve_method(&self, selector: &str) -> Result<Method> {
        if self.dataset.dimension() <= 2 {
            return Ok(Method::default());
        }
        Method::parse(selector, self.config.strict_method)
    }

    /// Ranks every query with the built-in strategies and writes the artifacts.
    pub fn execute(&self, method: Method) -> Result<RunReport> {
        let router = Router::new(self.dataset.dimension(), method, &self.config)?;
        self.execute_with(&router)
    }

    /// Ranks every query through `router` and writes the artifacts.
    pub fn execute_with(&self, router: &Router) -> Result<RunReport> {
        let start = Instant::now();

        // Every id is resolved before the first strategy call.
        let selected = select(&self.dataset, &self.queries)?;

        info!(
            records = self.dataset.len(),
            queries = selected.len(),
            dimension = self.dataset.dimension(),
            strategy = router.strategy_name(),
            parallel = self.config.parallel,
            "starting maxrank run"
        );

        let table = if self.config.parallel {
            let indexed = selected
                .par_iter()
                .enumerate()
                .map(|(idx, (id, point))| {
                    router
                        .route(&self.dataset, id, point)
                        .map(|result| (idx, result))
                })
                .collect::<Result<Vec<_>>>()?;
            ResultTable::from_indexed(indexed)
        } else {
            let mut table = ResultTable::with_capacity(selected.len());
            for (id, point) in &selected {
                table.push(router.route(&self.dataset, id, point)?);
            }
            table
        };

        let (summary, artifacts) = write_artifacts(&table, &self.config)?;
        let elapsed = start.elapsed();

        info!(
            queries = table.len(),
            min = summary.min,
            max = summary.max,
            avg = summary.avg,
            elapsed_ms = elapsed.as_millis() as u64,
            "maxrank run complete"
        );

        Ok(RunReport {
            table,
            summary,
            artifacts,
            strategy: router.strategy_name(),
            elapsed,
        })
    }
}
