//! Tests for `router` module

use super::cell::{VertexCell, WitnessCells};
use super::config::RunConfig;
use super::error::{Error, Result};
use super::point::{Dataset, Point, PointId};
use super::router::{Method, Router};
use super::strategy::{RankStrategy, StrategyOutput};

// =============================================================================
// Method selector
// =============================================================================

#[test]
fn test_method_canonical_selectors() {
    assert_eq!("exact-high-dim".parse::<Method>().unwrap(), Method::Exact);
    assert_eq!(
        "approximate-high-dim".parse::<Method>().unwrap(),
        Method::Approximate
    );
}

#[test]
fn test_method_aliases_are_case_insensitive() {
    for selector in ["BA", "ba", "basic", "Exact", " exact "] {
        assert_eq!(selector.parse::<Method>().unwrap(), Method::Exact, "{selector}");
    }
    for selector in ["AA", "aa", "approximate", "APPROXIMATE-HIGH-DIM"] {
        assert_eq!(
            selector.parse::<Method>().unwrap(),
            Method::Approximate,
            "{selector}"
        );
    }
}

#[test]
fn test_method_display_round_trips() {
    for method in [Method::Exact, Method::Approximate] {
        assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
    }
    assert_eq!(Method::default(), Method::Approximate);
}

#[test]
fn test_unknown_selector_falls_back_to_approximate() {
    assert_eq!(Method::parse("foo", false).unwrap(), Method::Approximate);
    assert_eq!(Method::parse("", false).unwrap(), Method::Approximate);
}

#[test]
fn test_unknown_selector_is_rejected_when_strict() {
    let err = Method::parse("foo", true).unwrap_err();

    assert!(matches!(err, Error::UnknownMethod(ref s) if s == "foo"));
    assert_eq!(Method::parse("BA", true).unwrap(), Method::Exact);
}

// =============================================================================
// Router construction
// =============================================================================

#[test]
fn test_two_dimensions_ignore_method() {
    let config = RunConfig::default();

    for method in [Method::Exact, Method::Approximate] {
        let router = Router::new(2, method, &config).unwrap();
        assert_eq!(router.strategy_name(), "planar-sweep");
        assert_eq!(router.dimension(), 2);
    }
}

#[test]
fn test_high_dimensions_follow_method() {
    let config = RunConfig::default();

    let exact = Router::new(3, Method::Exact, &config).unwrap();
    let approx = Router::new(4, Method::Approximate, &config).unwrap();

    assert_eq!(exact.strategy_name(), "vertex-enumeration");
    assert_eq!(approx.strategy_name(), "simplex-sampling");
    assert_eq!(approx.dimension(), 4);
}

#[test]
fn test_degenerate_dimensions_are_rejected() {
    let config = RunConfig::default();

    for dim in [0, 1] {
        let err = Router::new(dim, Method::Exact, &config).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDimension(d) if d == dim));
    }
}

struct Fixed(Vec<VertexCell>);

impl RankStrategy for Fixed {
    type Cell = VertexCell;

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn rank(&self, _: &Dataset, _: &Point) -> Result<StrategyOutput<VertexCell>> {
        Ok(StrategyOutput {
            rank: 7,
            cells: self.0.clone(),
        })
    }
}

#[test]
fn test_simplex_router_rejects_planar_dimension() {
    let err = Router::simplex(2, Box::new(Fixed(Vec::new()))).unwrap_err();

    assert!(matches!(err, Error::UnsupportedDimension(2)));
}

// =============================================================================
// Routing
// =============================================================================

fn planar_dataset() -> Dataset {
    Dataset::new(
        vec![
            Point::new("A", vec![0.1, 0.9]),
            Point::new("B", vec![0.5, 0.5]),
            Point::new("C", vec![0.9, 0.1]),
        ],
        2,
    )
    .unwrap()
}

#[test]
fn test_route_tags_planar_results_as_intervals() {
    let dataset = planar_dataset();
    let router = Router::new(2, Method::Approximate, &RunConfig::default()).unwrap();
    let id = PointId::new("B");

    let result = router
        .route(&dataset, &id, dataset.get(&id).unwrap())
        .unwrap();

    assert_eq!(result.query_id, id);
    assert!(result.rank >= 1);
    assert_eq!(result.cells.variant(), "interval");
    assert!(!result.cells.is_empty());
}

#[test]
fn test_route_tags_simplex_results_as_vertices() {
    let dataset = Dataset::new(vec![Point::new("q", vec![0.2, 0.3, 0.5])], 3).unwrap();
    let cell = VertexCell::new(vec![0.5, 0.5]);
    let router = Router::simplex(3, Box::new(Fixed(vec![cell.clone()]))).unwrap();
    let id = PointId::new("q");

    let result = router
        .route(&dataset, &id, dataset.get(&id).unwrap())
        .unwrap();

    assert_eq!(result.rank, 7);
    assert_eq!(result.cells, WitnessCells::Vertex(vec![cell]));
}

#[test]
fn test_route_rejects_empty_witness_list() {
    let dataset = Dataset::new(vec![Point::new("q", vec![0.2, 0.3, 0.5])], 3).unwrap();
    let router = Router::simplex(3, Box::new(Fixed(Vec::new()))).unwrap();
    let id = PointId::new("q");

    let err = router
        .route(&dataset, &id, dataset.get(&id).unwrap())
        .unwrap_err();

    assert!(matches!(err, Error::Strategy { strategy: "fixed", .. }));
}

#[test]
fn test_router_debug_names_strategy() {
    let router = Router::new(3, Method::Exact, &RunConfig::default()).unwrap();

    let debug = format!("{router:?}");

    assert!(debug.contains("vertex-enumeration"));
}
