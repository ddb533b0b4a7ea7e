//! Tests for `selector` module

use super::error::Error;
use super::point::{Dataset, Point, PointId};
use super::selector::select;

fn dataset() -> Dataset {
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
fn test_select_preserves_request_order() {
    let dataset = dataset();
    let requested = vec![PointId::new("C"), PointId::new("A"), PointId::new("C")];

    let selected = select(&dataset, &requested).unwrap();

    let ids: Vec<&str> = selected.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["C", "A", "C"]);
    assert_eq!(selected[1].1.coords(), &[0.1, 0.9]);
}

#[test]
fn test_select_fails_on_missing_id() {
    let dataset = dataset();
    let requested = vec![PointId::new("A"), PointId::new("Z"), PointId::new("Y")];

    let err = select(&dataset, &requested).unwrap_err();

    assert!(matches!(err, Error::QueryNotFound(id) if id == "Z"));
}

#[test]
fn test_select_empty_request() {
    let dataset = dataset();

    let selected = select(&dataset, &[]).unwrap();

    assert!(selected.is_empty());
}
