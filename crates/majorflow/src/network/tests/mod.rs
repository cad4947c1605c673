mod determinism;
mod serialization;
mod sizing;

use super::config::LayoutConfig;
use super::dataset::{Network, build_network};
use super::types::{EdgeDatum, Entity, FlowRecord};

/// Helper to create an Entity.
fn entity(id: &str, category: &str, weight: u64) -> Entity {
    Entity {
        id: id.to_string(),
        category: category.to_string(),
        weight,
    }
}

/// Helper to create a FlowRecord.
fn flow(source: &str, target: &str, count: u64) -> FlowRecord {
    FlowRecord {
        source: source.to_string(),
        target: target.to_string(),
        count,
    }
}

/// `n` entities in one category, ids `M00`, `M01`, ... so that id order
/// matches ring order.
fn ring(n: usize) -> Vec<Entity> {
    (0..n)
        .map(|i| entity(&format!("M{i:02}"), "SOC", 10))
        .collect()
}

fn config() -> LayoutConfig {
    LayoutConfig::default()
}

fn build(entities: &[Entity], flows: &[FlowRecord]) -> Network {
    build_network(entities, flows, &config()).unwrap()
}

/// Find the edge between two entities, in either orientation.
fn find_edge<'a>(network: &'a Network, a: &str, b: &str) -> &'a EdgeDatum {
    network
        .edges
        .iter()
        .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
        .unwrap_or_else(|| panic!("no edge between {a} and {b}"))
}

/// Assert two floats agree to within 1e-9.
fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
