//! Exact maximum rank for two attributes.
//!
//! With weights `(w, 1 - w)`, every incomparable record crosses the query
//! exactly once on `[0, 1]`. Sorting the crossings splits the weight axis into
//! alternating points and open gaps; each piece has a constant outranker count,
//! evaluated exactly by binary search over the sorted crossings.

use tracing::debug;

use super::{check_input, Competitors, RankStrategy, StrategyOutput};
use crate::cell::IntervalCell;
use crate::error::Result;
use crate::point::{Dataset, Point};

/// Exact sweep over the first-attribute weight.
#[derive(Debug, Clone)]
pub struct PlanarSweep {
    tolerance: f64,
}

impl PlanarSweep {
    /// Creates the strategy with the given tie tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for PlanarSweep {
    fn default() -> Self {
        Self::new(1e-9)
    }
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    left: f64,
    right: f64,
    count: usize,
}

impl RankStrategy for PlanarSweep {
    type Cell = IntervalCell;

    fn name(&self) -> &'static str {
        "planar-sweep"
    }

    fn rank(&self, dataset: &Dataset, query: &Point) -> Result<StrategyOutput<IntervalCell>> {
        check_input(self.name(), dataset, query, |d| d == 2)?;

        let competitors = Competitors::classify(dataset, query, self.tolerance);

        // `rising` records outrank for w above their crossing, `falling` below.
        let mut rising = Vec::new();
        let mut falling = Vec::new();
        for diff in &competitors.incomparable {
            let (d0, d1) = (diff[0], diff[1]);
            let crossing = (self.tolerance - d1) / (d0 - d1);
            if d0 > d1 {
                rising.push(crossing);
            } else {
                falling.push(crossing);
            }
        }
        rising.sort_by(f64::total_cmp);
        falling.sort_by(f64::total_cmp);

        let mut stops: Vec<f64> = rising
            .iter()
            .chain(&falling)
            .copied()
            .filter(|w| *w > 0.0 && *w < 1.0)
            .collect();
        stops.push(0.0);
        stops.push(1.0);
        stops.sort_by(f64::total_cmp);
        stops.dedup();

        let always = competitors.always;
        let at_point = |t: f64| {
            always
                + rising.partition_point(|&b| b < t)
                + (falling.len() - falling.partition_point(|&b| b <= t))
        };
        let in_gap = |lo: f64, hi: f64| {
            always
                + rising.partition_point(|&b| b <= lo)
                + (falling.len() - falling.partition_point(|&b| b < hi))
        };

        let mut pieces = Vec::with_capacity(stops.len() * 2);
        for (k, &t) in stops.iter().enumerate() {
            pieces.push(Piece {
                left: t,
                right: t,
                count: at_point(t),
            });
            if let Some(&next) = stops.get(k + 1) {
                pieces.push(Piece {
                    left: t,
                    right: next,
                    count: in_gap(t, next),
                });
            }
        }

        let best = pieces.iter().map(|p| p.count).min().unwrap_or(always);

        // Minimal open gaps always have minimal endpoints, so every run of
        // minimal pieces starts and ends on a point: a closed interval.
        let mut cells: Vec<IntervalCell> = Vec::new();
        let mut run: Option<IntervalCell> = None;
        for piece in &pieces {
            if piece.count == best {
                run = Some(match run {
                    Some(cell) => IntervalCell::new(cell.left, piece.right),
                    None => IntervalCell::new(piece.left, piece.right),
                });
            } else if let Some(cell) = run.take() {
                cells.push(cell);
            }
        }
        cells.extend(run);

        debug!(
            query = %query.id(),
            always,
            incomparable = competitors.incomparable.len(),
            pieces = pieces.len(),
            "planar sweep done"
        );

        Ok(StrategyOutput {
            rank: best + 1,
            cells,
        })
    }
}
