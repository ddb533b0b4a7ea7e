//! Exact maximum rank for more than two attributes, by vertex enumeration.
//!
//! Works in reduced simplex coordinates `x` (the first `D - 1` weights). Each
//! incomparable record contributes the hyperplane where it ties the query;
//! the simplex contributes `x_i = 0` and `sum(x) = 1`. The outranker count is
//! lower semicontinuous, so its minimum over the closed simplex is reached at
//! a vertex of this arrangement: enumerating all `(D - 1)`-subsets of
//! hyperplanes and keeping the feasible intersections is exact.
//!
//! Cost grows as `C(n + D, D - 1)`; use [`super::SimplexSampling`] for large inputs.

use tracing::debug;

use super::{check_input, push_distinct, Competitors, RankStrategy, StrategyOutput};
use crate::cell::{full_weights, VertexCell};
use crate::error::{Error, Result};
use crate::point::{Dataset, Point};

const PIVOT_EPS: f64 = 1e-12;
const FEASIBILITY_EPS: f64 = 1e-9;

/// Exhaustive arrangement-vertex enumeration.
#[derive(Debug, Clone)]
pub struct VertexEnumeration {
    tolerance: f64,
}

impl VertexEnumeration {
    /// Creates the strategy with the given tie tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for VertexEnumeration {
    fn default() -> Self {
        Self::new(1e-9)
    }
}

/// `normal · x = offset`; `record` is set for record hyperplanes.
struct Hyperplane {
    normal: Vec<f64>,
    offset: f64,
    record: Option<usize>,
}

fn hyperplanes(competitors: &Competitors, free: usize) -> Vec<Hyperplane> {
    let mut planes = Vec::with_capacity(competitors.incomparable.len() + free + 1);

    // w · d = sum_i x_i (d_i - d_last) + d_last
    for (idx, diff) in competitors.incomparable.iter().enumerate() {
        let last = diff[free];
        planes.push(Hyperplane {
            normal: diff[..free].iter().map(|d| d - last).collect(),
            offset: competitors.tolerance - last,
            record: Some(idx),
        });
    }

    for axis in 0..free {
        let mut normal = vec![0.0; free];
        normal[axis] = 1.0;
        planes.push(Hyperplane {
            normal,
            offset: 0.0,
            record: None,
        });
    }

    planes.push(Hyperplane {
        normal: vec![1.0; free],
        offset: 1.0,
        record: None,
    });

    planes
}

/// Solves `a x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` for (numerically) singular systems.
pub(crate) fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < PIVOT_EPS {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

/// Advances `indices` to the next `k`-combination of `0..n` in lexicographic
/// order. Returns false once exhausted.
pub(crate) fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let Some(pos) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
        return false;
    };
    indices[pos] += 1;
    for i in pos + 1..k {
        indices[i] = indices[i - 1] + 1;
    }
    true
}

/// Checks that `x` lies in the reduced simplex and snaps rounding noise back
/// onto it: negative coordinates become 0, a sum above 1 is rescaled to 1.
pub(crate) fn feasible(x: &mut [f64]) -> bool {
    if x.iter().any(|v| !v.is_finite() || *v < -FEASIBILITY_EPS) {
        return false;
    }
    if x.iter().sum::<f64>() > 1.0 + FEASIBILITY_EPS {
        return false;
    }
    for v in x.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
    let total: f64 = x.iter().sum();
    if total > 1.0 {
        for v in x.iter_mut() {
            *v /= total;
        }
    }
    true
}

impl RankStrategy for VertexEnumeration {
    type Cell = VertexCell;

    fn name(&self) -> &'static str {
        "vertex-enumeration"
    }

    fn rank(&self, dataset: &Dataset, query: &Point) -> Result<StrategyOutput<VertexCell>> {
        check_input(self.name(), dataset, query, |d| d > 2)?;

        let free = dataset.dimension() - 1;
        let competitors = Competitors::classify(dataset, query, self.tolerance);
        let planes = hyperplanes(&competitors, free);

        let mut best = usize::MAX;
        let mut witnesses: Vec<Vec<f64>> = Vec::new();
        let mut visited = 0_usize;

        let mut subset: Vec<usize> = (0..free).collect();
        let mut boundary = Vec::with_capacity(free);
        loop {
            visited += 1;
            let a = subset.iter().map(|&i| planes[i].normal.clone()).collect();
            let b = subset.iter().map(|&i| planes[i].offset).collect();

            if let Some(mut x) = solve(a, b) {
                if feasible(&mut x) {
                    boundary.clear();
                    boundary.extend(subset.iter().filter_map(|&i| planes[i].record));

                    let count = competitors.count(&full_weights(&x), &boundary);
                    if count < best {
                        best = count;
                        witnesses.clear();
                        witnesses.push(x);
                    } else if count == best {
                        push_distinct(&mut witnesses, x, FEASIBILITY_EPS);
                    }
                }
            }

            if !next_combination(&mut subset, planes.len()) {
                break;
            }
        }

        debug!(
            query = %query.id(),
            always = competitors.always,
            incomparable = competitors.incomparable.len(),
            subsets = visited,
            "vertex enumeration done"
        );

        if witnesses.is_empty() {
            return Err(Error::strategy(self.name(), "no feasible vertex found"));
        }

        Ok(StrategyOutput {
            rank: best + 1,
            cells: witnesses.into_iter().map(VertexCell::new).collect(),
        })
    }
}
