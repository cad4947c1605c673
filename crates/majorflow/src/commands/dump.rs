use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use majorflow::interaction::{FlowFilter, visible_edges};
use majorflow::network::serialize::curve_to_path;
use majorflow::network::{
    CurveDirection, EdgeDatum, LabelDatum, Network, NodeDatum, route_all_edges,
};

/// Edge record plus the routed curve.
#[derive(Debug, Serialize)]
struct RoutedEdge<'a> {
    #[serde(flatten)]
    edge: &'a EdgeDatum,
    curvature: f64,
    collision: bool,
    direction: CurveDirection,
    path: String,
}

#[derive(Debug, Serialize)]
struct Dump<'a> {
    filter: String,
    nodes: &'a [NodeDatum],
    edges: Vec<RoutedEdge<'a>>,
    labels: &'a [LabelDatum],
}

fn render(network: &Network, filter: FlowFilter) -> Result<String> {
    let visible = visible_edges(&network.edges, filter);
    let edges = route_all_edges(network, visible)?
        .into_iter()
        .map(|(edge, route)| RoutedEdge {
            edge,
            curvature: route.curvature,
            collision: route.has_collision,
            direction: route.direction,
            path: curve_to_path(&route.curve),
        })
        .collect();

    let dump = Dump {
        filter: filter.label(),
        nodes: &network.nodes,
        edges,
        labels: &network.labels,
    };
    Ok(serde_yaml::to_string(&dump)?)
}

pub fn run(file: &Path, filter: FlowFilter) -> Result<()> {
    let network = super::load_network(file)?;
    print!("{}", render(&network, filter)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use majorflow::dataset::Dataset;

    fn network() -> Network {
        Dataset::from_yaml(
            "\
entities:
  - { id: PSYC, category: SOC, weight: 120 }
  - { id: NEUR, category: APP, weight: 45 }
  - { id: HIST, category: HUM, weight: 60 }
flows:
  - { source: PSYC, target: NEUR, count: 14 }
  - { source: NEUR, target: PSYC, count: 3 }
  - { source: HIST, target: PSYC, count: 2 }
",
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn dump_lists_visible_edges_with_paths() {
        let yaml = render(&network(), FlowFilter::default()).unwrap();
        assert!(yaml.contains("total_flow: 17"));
        assert!(yaml.contains("path: M "));
        assert!(!yaml.contains("total_flow: 2"));
    }

    #[test]
    fn dump_all_includes_small_edges() {
        let yaml = render(&network(), FlowFilter::All).unwrap();
        assert!(yaml.contains("total_flow: 2"));
        assert!(yaml.contains("filter: all flows"));
    }
}
