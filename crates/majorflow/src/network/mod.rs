//! Circular layout and curve routing for flow networks.
//!
//! Entities are placed on a ring grouped by category; directed flows are
//! collapsed into undirected edges; each edge is drawn as a quadratic curve
//! whose bow depends on how far apart its endpoints sit on the ring and on
//! whether its chord midpoint lands on an unrelated node.

pub mod config;
pub mod dataset;
pub mod error;
pub mod flows;
pub mod geometry;
pub mod routing;
pub mod serialize;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{CategoryStyle, CurvatureTiers, LayoutConfig, Winding};
pub use dataset::{Network, build_network, radius_size};
pub use error::NetworkError;
pub use geometry::Layout;
pub use routing::{CurveTier, PathCache};
pub use types::{
    CurveDirection, CurveRoute, Edge, EdgeDatum, Entity, FlowRecord, LabelDatum, NodeDatum, Point,
    QuadCurve,
};

/// Route every edge of a network.
///
/// Positions are fixed after load, so each edge is routed independently and
/// the result is in edge order.
pub fn route_all_edges<'a>(
    network: &Network,
    edges: impl IntoIterator<Item = &'a EdgeDatum>,
) -> Result<Vec<(&'a EdgeDatum, CurveRoute)>, NetworkError> {
    edges
        .into_iter()
        .map(|edge| Ok((edge, network.edge_path(edge)?)))
        .collect()
}
