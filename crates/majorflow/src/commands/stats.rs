use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use majorflow::interaction::{FlowFilter, visible_edges};
use majorflow::network::routing::edge_tier;
use majorflow::network::{CurveDirection, CurveTier, Network, route_all_edges};

/// Routing outcome counts over a set of edges.
#[derive(Debug, Default, PartialEq)]
struct RoutingSummary {
    near: usize,
    mid: usize,
    far: usize,
    collisions: usize,
    inward: usize,
    outward: usize,
}

fn summarise(network: &Network) -> Result<RoutingSummary> {
    let tiers = &network.config.curvature;
    let mut summary = RoutingSummary::default();
    for (edge, route) in route_all_edges(network, &network.edges)? {
        match edge_tier(edge, &network.layout, tiers)? {
            CurveTier::Near => summary.near += 1,
            CurveTier::Mid => summary.mid += 1,
            CurveTier::Far => summary.far += 1,
        }
        if route.has_collision {
            summary.collisions += 1;
        }
        match route.direction {
            CurveDirection::Inward => summary.inward += 1,
            CurveDirection::Outward => summary.outward += 1,
        }
    }
    Ok(summary)
}

/// Label and value rows for the edge section.
fn edge_rows(network: &Network, threshold: u64) -> Vec<(String, u64)> {
    let visible = visible_edges(&network.edges, FlowFilter::AtLeast(threshold)).len();
    vec![
        ("total".to_string(), network.edges.len() as u64),
        (format!("flow \u{2265} {threshold}"), visible as u64),
        ("largest flow".to_string(), network.max_total_flow()),
    ]
}

/// `threshold` is the user's default, used for the visible edge count.
pub fn run(file: &Path, threshold: u64) -> Result<()> {
    let network = super::load_network(file)?;

    println!("{}", file.display().to_string().bold());
    println!();
    println!("{}", "Entities".bold());
    for style in &network.config.categories {
        let count = network
            .nodes
            .iter()
            .filter(|n| n.category == style.code)
            .count();
        if count > 0 {
            println!("  {:<6} {:<24} {count}", style.code, style.label().dimmed());
        }
    }
    println!("  {:<31} {}", "total", network.nodes.len());

    println!();
    println!("{}", "Edges".bold());
    for (label, value) in edge_rows(&network, threshold) {
        println!("  {label:<31} {value}");
    }

    let summary = summarise(&network)?;
    println!();
    println!("{}", "Routing".bold());
    println!("  {:<31} {}", "near (strong bow)", summary.near);
    println!("  {:<31} {}", "mid", summary.mid);
    println!("  {:<31} {}", "far (gentle bow)", summary.far);
    let collisions = if summary.collisions > 0 {
        summary.collisions.to_string().yellow()
    } else {
        summary.collisions.to_string().green()
    };
    println!("  {:<31} {collisions}", "midpoint collisions");
    let (inward, outward) = (summary.inward, summary.outward);
    println!("  {:<31} {inward} / {outward}", "inward / outward");
    Ok(())
}
