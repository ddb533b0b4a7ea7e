//! Resolution of requested query ids against the dataset.

use crate::error::{Error, Result};
use crate::point::{Dataset, Point, PointId};

/// Resolves every requested id to its point, preserving request order.
///
/// Fails on the first id the dataset does not contain; duplicates resolve
/// independently.
pub fn select<'a>(dataset: &'a Dataset, requested: &[PointId]) -> Result<Vec<(PointId, &'a Point)>> {
    requested
        .iter()
        .map(|id| {
            dataset
                .get(id)
                .map(|point| (id.clone(), point))
                .ok_or_else(|| Error::QueryNotFound(id.to_string()))
        })
        .collect()
}
