//! Point and dataset structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Opaque, stable identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Creates an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A record: an identifier and its (pre-normalised) attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    coords: Vec<f64>,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(id: impl Into<PointId>, coords: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            coords,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &PointId {
        &self.id
    }

    /// Returns the attribute values.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Weighted score `w · coords`.
    #[must_use]
    pub fn score(&self, weights: &[f64]) -> f64 {
        self.coords.iter().zip(weights).map(|(x, w)| x * w).sum()
    }
}

/// Ordered, id-indexed collection of points sharing one dimensionality.
#[derive(Debug, Clone)]
pub struct Dataset {
    points: Vec<Point>,
    index: HashMap<PointId, usize>,
    dimension: usize,
}

impl Dataset {
    /// Builds a dataset, enforcing unique ids and a uniform dimension.
    ///
    /// `dimension` is taken from the header when the file has no rows.
    pub fn new(points: Vec<Point>, dimension: usize) -> Result<Self> {
        let mut index = HashMap::with_capacity(points.len());

        for (pos, point) in points.iter().enumerate() {
            if point.dimension() != dimension {
                return Err(Error::DimensionMismatch {
                    row: pos + 1,
                    expected: dimension,
                    actual: point.dimension(),
                });
            }
            if index.insert(point.id.clone(), pos).is_some() {
                return Err(Error::DuplicateId(point.id.to_string()));
            }
        }

        Ok(Self {
            points,
            index,
            dimension,
        })
    }

    /// Looks a point up by id.
    #[must_use]
    pub fn get(&self, id: &PointId) -> Option<&Point> {
        self.index.get(id).map(|&pos| &self.points[pos])
    }

    /// Number of attributes per point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the dataset holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates points in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Points in file order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
