use super::*;
use crate::network::serialize::{curve_to_path, path_to_curve};
use crate::network::types::{Point, QuadCurve};

#[test]
fn whole_numbers_print_without_decimals() {
    let curve = QuadCurve {
        start: Point::new(-250.0, 0.0),
        control: Point::new(0.0, 12.5),
        end: Point::new(250.0, 0.0),
    };
    assert_eq!(curve_to_path(&curve), "M -250 0 Q 0 12.5 250 0");
}

#[test]
fn parse_round_trips_exact_values() {
    let curve = QuadCurve {
        start: Point::new(1.5, -2.25),
        control: Point::new(3.0, 4.75),
        end: Point::new(-6.0, 7.5),
    };
    assert_eq!(path_to_curve(&curve_to_path(&curve)), Some(curve));
}

#[test]
fn routed_paths_parse_back_within_rounding() {
    let network = build(&ring(8), &[flow("M00", "M03", 4), flow("M02", "M06", 9)]);
    for edge in &network.edges {
        let route = network.edge_path(edge).unwrap();
        let parsed = path_to_curve(&curve_to_path(&route.curve)).unwrap();
        assert!(parsed.start.distance_to(route.curve.start) < 0.01);
        assert!(parsed.control.distance_to(route.curve.control) < 0.01);
        assert!(parsed.end.distance_to(route.curve.end) < 0.01);
    }
}

#[test]
fn parse_rejects_wrong_arity() {
    assert_eq!(path_to_curve("M 0 0 Q 1 1"), None);
    assert_eq!(path_to_curve(""), None);
}
