//! Order-preserving accumulation of per-query results.

use serde::{Deserialize, Serialize};

use crate::cell::WitnessCells;
use crate::point::PointId;

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    /// Requested id.
    pub query_id: PointId,
    /// Best achievable 1-based rank.
    pub rank: usize,
    /// Witness cells, all of one variant.
    pub cells: WitnessCells,
}

/// All results of a run, in query submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    results: Vec<RankResult>,
}

impl ResultTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` results.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    /// Rebuilds submission order from `(query index, result)` pairs received
    /// in any order.
    #[must_use]
    pub fn from_indexed(mut indexed: Vec<(usize, RankResult)>) -> Self {
        indexed.sort_by_key(|(idx, _)| *idx);
        Self {
            results: indexed.into_iter().map(|(_, result)| result).collect(),
        }
    }

    /// Appends a result.
    pub fn push(&mut self, result: RankResult) {
        self.results.push(result);
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no query was processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates results in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, RankResult> {
        self.results.iter()
    }

    /// Rank column.
    #[must_use]
    pub fn ranks(&self) -> Vec<usize> {
        self.results.iter().map(|r| r.rank).collect()
    }

    /// Whether the table holds interval (2-D) results.
    #[must_use]
    pub fn is_interval(&self) -> bool {
        matches!(
            self.results.first().map(|r| &r.cells),
            Some(WitnessCells::Interval(_))
        )
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a RankResult;
    type IntoIter = std::slice::Iter<'a, RankResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<RankResult> for ResultTable {
    fn from_iter<I: IntoIterator<Item = RankResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}
