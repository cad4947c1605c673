use super::config::LayoutConfig;
use super::error::NetworkError;
use super::flows::aggregate;
use super::geometry::{Layout, category_labels, layout};
use super::routing::{edge_curvature, edge_path};
use super::types::{CurveRoute, EdgeDatum, Entity, FlowRecord, LabelDatum, NodeDatum};

/// Everything the renderer needs, computed once per dataset load.
#[derive(Debug, Clone)]
pub struct Network {
    pub nodes: Vec<NodeDatum>,
    pub edges: Vec<EdgeDatum>,
    pub labels: Vec<LabelDatum>,
    pub layout: Layout,
    pub config: LayoutConfig,
}

impl Network {
    pub fn node(&self, id: &str) -> Option<&NodeDatum> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Route `edge` against this network's layout.
    pub fn edge_path(&self, edge: &EdgeDatum) -> Result<CurveRoute, NetworkError> {
        edge_path(edge, &self.layout, &self.config)
    }

    /// Largest total flow over all edges, 0 when there are none.
    pub fn max_total_flow(&self) -> u64 {
        self.edges.iter().map(|e| e.total_flow).max().unwrap_or(0)
    }
}

/// Drawn node radius: square-root scale from `[0, max_weight]` onto the
/// configured node radius range.
pub fn radius_size(weight: u64, max_weight: u64, config: &LayoutConfig) -> f64 {
    let span = config.node_radius_max - config.node_radius_min;
    if max_weight == 0 {
        return config.node_radius_min;
    }
    let ratio = (weight.min(max_weight) as f64 / max_weight as f64).sqrt();
    config.node_radius_min + span * ratio
}

/// Lay out entities, aggregate flows, and assemble node, edge and label data.
pub fn build_network(
    entities: &[Entity],
    flows: &[FlowRecord],
    config: &LayoutConfig,
) -> Result<Network, NetworkError> {
    config.validate()?;

    let layout = layout(entities, config)?;
    let edges = aggregate(entities, flows)?;
    let max_weight = entities.iter().map(|e| e.weight).max().unwrap_or(0);

    let nodes = layout
        .entities()
        .iter()
        .map(|e| NodeDatum {
            id: e.id.clone(),
            x: e.position.x,
            y: e.position.y,
            angle: e.angle,
            weight: e.weight,
            category: e.category.clone(),
            color: config.category_color(&e.category).to_string(),
            radius_size: radius_size(e.weight, max_weight, config),
        })
        .collect();

    let mut edge_data = Vec::with_capacity(edges.len());
    for edge in edges {
        let source = layout.get(&edge.source)?;
        let target = layout.get(&edge.target)?;
        edge_data.push(EdgeDatum {
            curvature_base: edge_curvature(source.angle, target.angle, &config.curvature),
            flow_source_to_target: edge.source_to_target,
            flow_target_to_source: edge.target_to_source,
            total_flow: edge.total(),
            color: config.category_color(&edge.dominant_category).to_string(),
            dominant_category: edge.dominant_category,
            source: edge.source,
            target: edge.target,
        });
    }

    let labels = category_labels(&layout, config)
        .into_iter()
        .map(|label| LabelDatum {
            color: config.category_color(&label.category).to_string(),
            category: label.category,
            text: label.text,
            x: label.position.x,
            y: label.position.y,
        })
        .collect();

    log::info!(
        "built network: {} nodes, {} edges",
        layout.len(),
        edge_data.len()
    );

    Ok(Network {
        nodes,
        edges: edge_data,
        labels,
        layout,
        config: config.clone(),
    })
}
