use std::collections::{BTreeMap, HashMap};

use super::error::NetworkError;
use super::types::{Edge, Entity, FlowRecord};

/// Summed counts for one unordered pair, keyed by `(lesser id, greater id)`.
#[derive(Debug, Default, Clone, Copy)]
struct PairCounts {
    forward: u64,
    backward: u64,
}

fn overflow((source, target): (&str, &str)) -> NetworkError {
    NetworkError::FlowOverflow {
        source: source.to_string(),
        target: target.to_string(),
    }
}

/// Collapse directed flow records into undirected edges.
///
/// Self-flows are dropped. Records naming an unknown entity fail the whole
/// aggregation, as does a pair whose summed counts exceed `u64::MAX`. Each
/// edge is oriented so that `source < target`; its dominant category is the
/// category of whichever endpoint receives the larger directional flow, with
/// ties going to `target`. Edges are returned
/// sorted by `(source, target)` and never carry a zero total.
pub fn aggregate(entities: &[Entity], flows: &[FlowRecord]) -> Result<Vec<Edge>, NetworkError> {
    let mut categories: HashMap<&str, &str> = HashMap::with_capacity(entities.len());
    for entity in entities {
        if categories
            .insert(entity.id.as_str(), entity.category.as_str())
            .is_some()
        {
            return Err(NetworkError::DuplicateEntity {
                id: entity.id.clone(),
            });
        }
    }

    let mut pairs: BTreeMap<(&str, &str), PairCounts> = BTreeMap::new();
    let mut self_flows = 0usize;

    for flow in flows {
        for id in [&flow.source, &flow.target] {
            if !categories.contains_key(id.as_str()) {
                return Err(NetworkError::UnknownEntity { id: id.clone() });
            }
        }
        if flow.source == flow.target {
            self_flows += 1;
            continue;
        }

        let (a, b) = (flow.source.as_str(), flow.target.as_str());
        let key = if a < b { (a, b) } else { (b, a) };
        let counts = pairs.entry(key).or_default();
        let slot = if a < b {
            &mut counts.forward
        } else {
            &mut counts.backward
        };
        *slot = slot
            .checked_add(flow.count)
            .ok_or_else(|| overflow(key))?;
        // The edge total must fit as well.
        counts
            .forward
            .checked_add(counts.backward)
            .ok_or_else(|| overflow(key))?;
    }

    if self_flows > 0 {
        log::debug!("discarded {self_flows} self-flow record(s)");
    }

    let edges: Vec<Edge> = pairs
        .into_iter()
        .filter(|(_, counts)| counts.forward > 0 || counts.backward > 0)
        .map(|((source, target), counts)| {
            let receiver = if counts.forward >= counts.backward {
                target
            } else {
                source
            };
            Edge {
                source: source.to_string(),
                target: target.to_string(),
                source_to_target: counts.forward,
                target_to_source: counts.backward,
                dominant_category: categories[receiver].to_string(),
            }
        })
        .collect();

    log::debug!(
        "aggregated {} flow record(s) into {} edge(s)",
        flows.len(),
        edges.len()
    );

    Ok(edges)
}
