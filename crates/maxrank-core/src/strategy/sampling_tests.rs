//! Tests for `SimplexSampling`.

use super::sampling::SimplexSampling;
use super::vertex::VertexEnumeration;
use super::RankStrategy;
use crate::point::{Dataset, Point, PointId};
use proptest::prelude::*;

fn dataset(rows: &[(&str, [f64; 3])]) -> Dataset {
    let points = rows
        .iter()
        .map(|(id, c)| Point::new(*id, c.to_vec()))
        .collect();
    Dataset::new(points, 3).unwrap()
}

#[test]
fn test_same_seed_same_output() {
    let data = dataset(&[
        ("q", [0.4, 0.5, 0.3]),
        ("a", [0.9, 0.1, 0.2]),
        ("b", [0.1, 0.8, 0.6]),
        ("c", [0.3, 0.3, 0.9]),
    ]);
    let query = data.get(&PointId::new("q")).unwrap();

    let first = SimplexSampling::new(1e-9, 256, 7).rank(&data, query).unwrap();
    let second = SimplexSampling::new(1e-9, 256, 7).rank(&data, query).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_corner_optimum_is_found() {
    let data = dataset(&[
        ("q", [1.0, 0.0, 0.0]),
        ("m", [0.6, 0.6, 0.6]),
        ("n", [0.5, 0.9, 0.1]),
    ]);
    let query = data.get(&PointId::new("q")).unwrap();

    let out = SimplexSampling::new(1e-9, 16, 1).rank(&data, query).unwrap();

    assert_eq!(out.rank, 1);
    assert_eq!(out.cells[0].coords(), &[1.0, 0.0]);
}

#[test]
fn test_witnesses_live_on_the_simplex() {
    let data = dataset(&[("q", [0.5, 0.5, 0.5]), ("a", [0.7, 0.2, 0.6])]);
    let query = data.get(&PointId::new("q")).unwrap();

    let out = SimplexSampling::new(1e-9, 128, 3).rank(&data, query).unwrap();

    for cell in &out.cells {
        let weights = cell.full_weights();
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(weights.iter().all(|w| *w >= -1e-12));
    }
}

#[test]
fn test_rejects_two_dimensions() {
    let data = Dataset::new(vec![Point::new("a", vec![0.1, 0.2])], 2).unwrap();
    let query = data.get(&PointId::new("a")).unwrap();

    assert!(SimplexSampling::default().rank(&data, query).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_sampling_never_beats_exact(
        coords in prop::collection::vec(prop::array::uniform3(0.0f64..1.0), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let points: Vec<Point> = coords
            .iter()
            .enumerate()
            .map(|(i, c)| Point::new(format!("p{i}"), c.to_vec()))
            .collect();
        let data = Dataset::new(points, 3).unwrap();
        let query = &data.points()[pick.index(data.len())];

        let exact = VertexEnumeration::default().rank(&data, query).unwrap();
        let approx = SimplexSampling::new(1e-9, 512, 42).rank(&data, query).unwrap();

        prop_assert!(approx.rank >= exact.rank);
        prop_assert!(approx.rank <= data.len());
    }
}
