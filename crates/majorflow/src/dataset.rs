use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::network::{self, Entity, FlowRecord, LayoutConfig, Network, NetworkError};

/// Input records for one network, as read from a YAML file.
///
/// ```yaml
/// entities:
///   - { id: PSYC, category: SOC, weight: 120 }
///   - { id: NEUR, category: APP, weight: 45 }
/// flows:
///   - { source: PSYC, target: NEUR, count: 14 }
///   - { source: NEUR, target: PSYC, count: 3 }
/// layout:
///   radius: 250
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub flows: Vec<FlowRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let dataset: Dataset = serde_yaml::from_str(contents)?;
        log::debug!(
            "read {} entities and {} flow records",
            dataset.entities.len(),
            dataset.flows.len()
        );
        Ok(dataset)
    }

    /// Layout parameters from the file, or the defaults.
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout.clone().unwrap_or_default()
    }

    pub fn build(&self) -> Result<Network, NetworkError> {
        network::build_network(&self.entities, &self.flows, &self.layout_config())
    }
}
