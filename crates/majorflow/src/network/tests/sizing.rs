use super::*;
use crate::network::dataset::radius_size;

#[test]
fn heaviest_node_gets_max_radius() {
    assert_close(radius_size(400, 400, &config()), 20.0);
}

#[test]
fn weightless_node_gets_min_radius() {
    assert_close(radius_size(0, 400, &config()), 4.0);
}

#[test]
fn size_follows_square_root() {
    // sqrt(100 / 400) = 0.5
    assert_close(radius_size(100, 400, &config()), 12.0);
}

#[test]
fn all_zero_weights_use_min_radius() {
    assert_close(radius_size(0, 0, &config()), 4.0);
}

#[test]
fn size_is_monotonic() {
    let sizes: Vec<f64> = (0..=10)
        .map(|w| radius_size(w * 10, 100, &config()))
        .collect();
    for pair in sizes.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn network_nodes_are_normalised_to_max_weight() {
    let entities = vec![entity("A", "SOC", 25), entity("B", "SOC", 100)];
    let network = build(&entities, &[]);
    assert_close(network.node("A").unwrap().radius_size, 12.0);
    assert_close(network.node("B").unwrap().radius_size, 20.0);
}
