//! Approximate maximum rank by sampling the weight simplex.
//!
//! Evaluates the simplex corners, the barycentre and a fixed number of
//! uniformly distributed weight vectors. The reported rank is an upper bound
//! of the exact one; a fixed seed makes it reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{check_input, push_distinct, Competitors, RankStrategy, StrategyOutput};
use crate::cell::VertexCell;
use crate::config::ApproximateConfig;
use crate::error::{Error, Result};
use crate::point::{Dataset, Point};

const DEDUP_EPS: f64 = 1e-12;

/// Seeded Monte-Carlo search over the simplex.
#[derive(Debug, Clone)]
pub struct SimplexSampling {
    tolerance: f64,
    samples: usize,
    seed: u64,
}

impl SimplexSampling {
    /// Creates the strategy.
    #[must_use]
    pub fn new(tolerance: f64, samples: usize, seed: u64) -> Self {
        Self {
            tolerance,
            samples,
            seed,
        }
    }

    /// Creates the strategy from the `[approximate]` configuration section.
    #[must_use]
    pub fn from_config(tolerance: f64, config: &ApproximateConfig) -> Self {
        Self::new(tolerance, config.samples, config.seed)
    }

    /// Corners, barycentre, then `samples` uniform draws, as full weights.
    fn candidates(&self, dimension: usize) -> impl Iterator<Item = Vec<f64>> {
        let corners = (0..dimension).map(move |axis| {
            let mut w = vec![0.0; dimension];
            w[axis] = 1.0;
            w
        });
        let barycentre = std::iter::once(vec![1.0 / dimension as f64; dimension]);

        // Normalised unit exponentials are uniform on the simplex.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let draws = (0..self.samples).map(move |_| {
            let mut w: Vec<f64> = (0..dimension)
                .map(|_| -(1.0 - rng.gen::<f64>()).ln())
                .collect();
            let total: f64 = w.iter().sum();
            for v in &mut w {
                *v /= total;
            }
            w
        });

        corners.chain(barycentre).chain(draws)
    }
}

impl Default for SimplexSampling {
    fn default() -> Self {
        Self::from_config(1e-9, &ApproximateConfig::default())
    }
}

impl RankStrategy for SimplexSampling {
    type Cell = VertexCell;

    fn name(&self) -> &'static str {
        "simplex-sampling"
    }

    fn rank(&self, dataset: &Dataset, query: &Point) -> Result<StrategyOutput<VertexCell>> {
        check_input(self.name(), dataset, query, |d| d > 2)?;

        let dimension = dataset.dimension();
        let competitors = Competitors::classify(dataset, query, self.tolerance);

        let mut best = usize::MAX;
        let mut witnesses: Vec<Vec<f64>> = Vec::new();

        for weights in self.candidates(dimension) {
            let count = competitors.count(&weights, &[]);
            let reduced = weights[..dimension - 1].to_vec();
            if count < best {
                best = count;
                witnesses.clear();
                witnesses.push(reduced);
            } else if count == best {
                push_distinct(&mut witnesses, reduced, DEDUP_EPS);
            }
        }

        debug!(
            query = %query.id(),
            always = competitors.always,
            incomparable = competitors.incomparable.len(),
            samples = self.samples,
            "simplex sampling done"
        );

        if witnesses.is_empty() {
            return Err(Error::strategy(self.name(), "no candidate weight evaluated"));
        }

        Ok(StrategyOutput {
            rank: best + 1,
            cells: witnesses.into_iter().map(VertexCell::new).collect(),
        })
    }
}
