//! Strategy routing.
//!
//! The dataset dimensionality picks the strategy family; for more than two
//! attributes the method selector picks between the exact and the
//! approximate strategy. The router tags each result with its cell variant.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::accumulator::RankResult;
use crate::cell::{IntervalCell, VertexCell, WitnessCells};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::point::{Dataset, Point, PointId};
use crate::strategy::{PlanarSweep, RankStrategy, SimplexSampling, VertexEnumeration};

/// High-dimensional method selector. Ignored for 2-D data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Exhaustive, exact strategy.
    Exact,
    /// Sampling strategy.
    #[default]
    Approximate,
}

impl Method {
    /// Parses a selector, falling back to [`Method::Approximate`] on unknown
    /// input unless `strict` is set.
    pub fn parse(selector: &str, strict: bool) -> Result<Self> {
        match selector.parse() {
            Ok(method) => Ok(method),
            Err(err) if strict => Err(err),
            Err(_) => {
                warn!(
                    selector,
                    "unrecognised method selector, using approximate-high-dim"
                );
                Ok(Self::Approximate)
            }
        }
    }

    /// Canonical selector string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact-high-dim",
            Self::Approximate => "approximate-high-dim",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact-high-dim" | "exact" | "basic" | "ba" => Ok(Self::Exact),
            "approximate-high-dim" | "approximate" | "aa" => Ok(Self::Approximate),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type PlanarStrategy = Box<dyn RankStrategy<Cell = IntervalCell>>;
type SimplexStrategy = Box<dyn RankStrategy<Cell = VertexCell>>;

enum Route {
    Planar(PlanarStrategy),
    Simplex(SimplexStrategy),
}

/// Dispatches queries to the strategy fixed at construction.
pub struct Router {
    dimension: usize,
    route: Route,
}

impl Router {
    /// Builds the router for a dataset of `dimension` attributes.
    pub fn new(dimension: usize, method: Method, config: &RunConfig) -> Result<Self> {
        let tolerance = config.tolerance;
        let route = match dimension {
            0 | 1 => return Err(Error::UnsupportedDimension(dimension)),
            2 => Route::Planar(Box::new(PlanarSweep::new(tolerance))),
            _ => match method {
                Method::Exact => Route::Simplex(Box::new(VertexEnumeration::new(tolerance))),
                Method::Approximate => Route::Simplex(Box::new(SimplexSampling::from_config(
                    tolerance,
                    &config.approximate,
                ))),
            },
        };
        Ok(Self { dimension, route })
    }

    /// Router for 2-D data with a custom strategy.
    #[must_use]
    pub fn planar(strategy: PlanarStrategy) -> Self {
        Self {
            dimension: 2,
            route: Route::Planar(strategy),
        }
    }

    /// Router for `dimension > 2` data with a custom strategy.
    pub fn simplex(dimension: usize, strategy: SimplexStrategy) -> Result<Self> {
        if dimension <= 2 {
            return Err(Error::UnsupportedDimension(dimension));
        }
        Ok(Self {
            dimension,
            route: Route::Simplex(strategy),
        })
    }

    /// Name of the strategy every query goes to.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        match &self.route {
            Route::Planar(s) => s.name(),
            Route::Simplex(s) => s.name(),
        }
    }

    /// Dimensionality this router was built for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Ranks one query and tags its witness cells.
    pub fn route(&self, dataset: &Dataset, id: &PointId, query: &Point) -> Result<RankResult> {
        info!(query_id = %id, coords = ?query.coords(), "processing query");

        let (rank, cells) = match &self.route {
            Route::Planar(strategy) => {
                let out = strategy.rank(dataset, query)?;
                (out.rank, WitnessCells::Interval(out.cells))
            }
            Route::Simplex(strategy) => {
                let out = strategy.rank(dataset, query)?;
                (out.rank, WitnessCells::Vertex(out.cells))
            }
        };

        if cells.is_empty() {
            return Err(Error::strategy(
                self.strategy_name(),
                format!("no witness cell for query '{id}'"),
            ));
        }

        info!(query_id = %id, rank, cells = cells.len(), "query ranked");

        Ok(RankResult {
            query_id: id.clone(),
            rank,
            cells,
        })
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("dimension", &self.dimension)
            .field("strategy", &self.strategy_name())
            .finish()
    }
}
