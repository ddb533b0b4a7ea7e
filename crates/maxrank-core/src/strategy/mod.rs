//! Ranking strategies.
//!
//! A strategy computes the maximum rank of one query record and the weight
//! regions (witness cells) where that rank is reached.
//!
//! # Model
//!
//! Scores are linear: `score_w(p) = w · p` with `w` on the probability simplex.
//! A record `p` outranks the query `q` under `w` when
//! `w · p > w · q + tolerance`, so ties favour the query. The maximum rank is
//! `1 + min_w #outrankers(w)`.
//!
//! Records fall into three groups relative to `q`:
//! - **always**: `min_i (p_i - q_i) > tolerance`, outranks for every `w`
//! - **never**: `max_i (p_i - q_i) <= tolerance` (includes `q` itself)
//! - **incomparable**: everything else; only these shape the arrangement
//!
//! # Strategies
//!
//! - [`PlanarSweep`]: exact, 2 attributes, interval cells
//! - [`VertexEnumeration`]: exact, more than 2 attributes, vertex cells
//! - [`SimplexSampling`]: approximate, more than 2 attributes, vertex cells

mod planar;
mod sampling;
mod vertex;

#[cfg(test)]
mod sampling_tests;

pub use planar::PlanarSweep;
pub use sampling::SimplexSampling;
pub use vertex::VertexEnumeration;

use crate::error::{Error, Result};
use crate::point::{Dataset, Point};

/// Raw output of a strategy: the rank and its witness cells, in strategy order.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutput<C> {
    /// Best achievable 1-based rank.
    pub rank: usize,
    /// Witness cells; never empty on success.
    pub cells: Vec<C>,
}

/// A maximum-rank algorithm.
///
/// Implementations must be deterministic for a given dataset and query.
pub trait RankStrategy: Send + Sync {
    /// Cell shape produced by this strategy.
    type Cell;

    /// Stable strategy name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Computes the maximum rank of `query` within `dataset`.
    fn rank(&self, dataset: &Dataset, query: &Point) -> Result<StrategyOutput<Self::Cell>>;
}

/// Competitors of one query, split by how they can relate to it.
#[derive(Debug, Clone)]
pub(crate) struct Competitors {
    /// Records outranking the query under every weighting.
    pub always: usize,
    /// Difference vectors `p - q` of incomparable records.
    pub incomparable: Vec<Vec<f64>>,
    pub tolerance: f64,
}

impl Competitors {
    pub fn classify(dataset: &Dataset, query: &Point, tolerance: f64) -> Self {
        let mut always = 0;
        let mut incomparable = Vec::new();

        for point in dataset.iter() {
            let diff: Vec<f64> = point
                .coords()
                .iter()
                .zip(query.coords())
                .map(|(p, q)| p - q)
                .collect();
            let min = diff.iter().copied().fold(f64::INFINITY, f64::min);
            let max = diff.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            if min > tolerance {
                always += 1;
            } else if max > tolerance {
                incomparable.push(diff);
            }
        }

        Self {
            always,
            incomparable,
            tolerance,
        }
    }

    /// Outranking records under full weight vector `weights`, skipping the
    /// incomparable records listed in `on_boundary`.
    pub fn count(&self, weights: &[f64], on_boundary: &[usize]) -> usize {
        let crossing = self
            .incomparable
            .iter()
            .enumerate()
            .filter(|(idx, _)| !on_boundary.contains(idx))
            .filter(|(_, diff)| dot(diff, weights) > self.tolerance)
            .count();
        self.always + crossing
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Common input checks: query dimension and the strategy's supported range.
pub(crate) fn check_input(
    strategy: &'static str,
    dataset: &Dataset,
    query: &Point,
    supported: impl Fn(usize) -> bool,
) -> Result<()> {
    if query.dimension() != dataset.dimension() {
        return Err(Error::strategy(
            strategy,
            format!(
                "query '{}' has {} attributes, dataset has {}",
                query.id(),
                query.dimension(),
                dataset.dimension()
            ),
        ));
    }
    if !supported(dataset.dimension()) {
        return Err(Error::strategy(
            strategy,
            format!("dimension {} is not supported", dataset.dimension()),
        ));
    }
    Ok(())
}

/// Appends `candidate` unless a vertex within `eps` (max-norm) is present.
pub(crate) fn push_distinct(vertices: &mut Vec<Vec<f64>>, candidate: Vec<f64>, eps: f64) {
    let seen = vertices.iter().any(|v| {
        v.iter()
            .zip(&candidate)
            .all(|(a, b)| (a - b).abs() <= eps)
    });
    if !seen {
        vertices.push(candidate);
    }
}
