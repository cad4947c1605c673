use super::*;
use crate::network::route_all_edges;
use crate::network::serialize::curve_to_path;

fn sample_entities() -> Vec<Entity> {
    vec![
        entity("ENGL", "HUM", 80),
        entity("HIST", "HUM", 60),
        entity("PHIL", "HUM", 30),
        entity("ECON", "SOC", 150),
        entity("PSYC", "SOC", 120),
        entity("SOCI", "SOC", 70),
        entity("BIOL", "NAT", 140),
        entity("CHEM", "NAT", 90),
        entity("PHYS", "NAT", 40),
        entity("COMP", "APP", 200),
        entity("NEUR", "APP", 45),
    ]
}

fn sample_flows() -> Vec<FlowRecord> {
    vec![
        flow("PSYC", "NEUR", 14),
        flow("NEUR", "PSYC", 3),
        flow("BIOL", "CHEM", 22),
        flow("CHEM", "BIOL", 9),
        flow("PHYS", "COMP", 17),
        flow("ECON", "COMP", 12),
        flow("HIST", "ENGL", 5),
        flow("PHIL", "PSYC", 8),
        flow("SOCI", "PSYC", 11),
        flow("BIOL", "NEUR", 19),
        flow("ENGL", "COMP", 2),
    ]
}

/// Render a network's datasets and paths to one string.
fn snapshot(network: &Network) -> String {
    let mut out = String::new();
    out.push_str(&serde_yaml::to_string(&network.nodes).unwrap());
    out.push_str(&serde_yaml::to_string(&network.edges).unwrap());
    out.push_str(&serde_yaml::to_string(&network.labels).unwrap());
    for (edge, route) in route_all_edges(network, &network.edges).unwrap() {
        out.push_str(&format!(
            "{}-{} {}\n",
            edge.source,
            edge.target,
            curve_to_path(&route.curve)
        ));
    }
    out
}

#[test]
fn repeated_builds_are_identical() {
    let reference = snapshot(&build(&sample_entities(), &sample_flows()));
    for i in 1..20 {
        let again = snapshot(&build(&sample_entities(), &sample_flows()));
        assert_eq!(reference, again, "Non-deterministic result on iteration {i}");
    }
}

#[test]
fn shuffled_input_gives_identical_output() {
    let mut entities = sample_entities();
    entities.reverse();
    let mut flows = sample_flows();
    flows.rotate_left(4);
    assert_eq!(
        snapshot(&build(&sample_entities(), &sample_flows())),
        snapshot(&build(&entities, &flows))
    );
}

#[test]
fn path_cache_returns_routed_value() {
    let network = build(&sample_entities(), &sample_flows());
    let mut cache = crate::network::PathCache::new();
    for edge in &network.edges {
        let cached = cache
            .get_or_route(edge, &network.layout, &network.config)
            .unwrap();
        assert_eq!(cached, network.edge_path(edge).unwrap());
    }
    assert_eq!(cache.len(), network.edges.len());

    // Second pass is served from the cache.
    for edge in &network.edges {
        cache
            .get_or_route(edge, &network.layout, &network.config)
            .unwrap();
    }
    assert_eq!(cache.len(), network.edges.len());

    cache.clear();
    assert!(cache.is_empty());
}
