//! Witness cells: the weight regions where a query reaches its maximum rank.

use serde::{Deserialize, Serialize};

/// Closed interval of the first-attribute weight `w` in `[0, 1]`.
///
/// For 2-D data the score is `w * x0 + (1 - w) * x1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalCell {
    /// Lower bound of `w`.
    pub left: f64,
    /// Upper bound of `w`.
    pub right: f64,
}

impl IntervalCell {
    /// Creates an interval cell.
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Bounds as a `[left, right]` pair.
    #[must_use]
    pub const fn bounds(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Width of the interval; zero for a single admissible weight.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// A feasible weight vector in reduced simplex coordinates.
///
/// Holds the first `D - 1` weights; the last one is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexCell {
    coords: Vec<f64>,
}

impl VertexCell {
    /// Creates a vertex cell from its `D - 1` free weights.
    #[must_use]
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// The `D - 1` free weights.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The full `D`-weight vector, last weight `1 - sum(others)`.
    #[must_use]
    pub fn full_weights(&self) -> Vec<f64> {
        full_weights(&self.coords)
    }
}

/// Full weight vector from the first `D - 1` weights.
///
/// The implied last weight is clamped at zero so rounding never yields a
/// negative weight.
pub(crate) fn full_weights(reduced: &[f64]) -> Vec<f64> {
    let implied = (1.0 - reduced.iter().sum::<f64>()).max(0.0);
    let mut weights = Vec::with_capacity(reduced.len() + 1);
    weights.extend_from_slice(reduced);
    weights.push(implied);
    weights
}

/// Witness cells of one query, tagged by shape.
///
/// The tag is fixed by the dataset dimensionality when the query is routed,
/// so later stages never re-derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "cells", rename_all = "snake_case")]
pub enum WitnessCells {
    /// 2-D data.
    Interval(Vec<IntervalCell>),
    /// Data with more than two attributes.
    Vertex(Vec<VertexCell>),
}

impl WitnessCells {
    /// Number of witness cells.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Interval(cells) => cells.len(),
            Self::Vertex(cells) => cells.len(),
        }
    }

    /// Returns true if there is no witness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short variant name for diagnostics.
    #[must_use]
    pub const fn variant(&self) -> &'static str {
        match self {
            Self::Interval(_) => "interval",
            Self::Vertex(_) => "vertex",
        }
    }
}
