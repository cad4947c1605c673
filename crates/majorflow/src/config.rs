use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use majorflow::interaction::{DEFAULT_THRESHOLD, FlowFilter};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "majorflow";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Minimum total flow shown when filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,

    /// Initial filter mode: `all` or `threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `majorflow config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# majorflow configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme_name(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn threshold(&self) -> u64 {
        self.defaults
            .as_ref()
            .and_then(|d| d.threshold)
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Filter to start with, before command-line overrides.
    pub fn filter(&self) -> FlowFilter {
        match self.defaults.as_ref().and_then(|d| d.filter.as_deref()) {
            Some("all") => FlowFilter::All,
            _ => FlowFilter::AtLeast(self.threshold()),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.threshold" => {
                let threshold: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "Invalid threshold: {value}. Must be a non-negative whole number."
                    )
                })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .threshold = Some(threshold);
            }
            "defaults.filter" => {
                match value {
                    "all" | "threshold" => {}
                    _ => anyhow::bail!("Invalid filter: {value}. Must be 'all' or 'threshold'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .filter = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. \
                 Valid keys: defaults.theme, defaults.threshold, defaults.filter"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::default();
        assert_eq!(config.theme_name(), "light");
        assert_eq!(config.threshold(), 10);
        assert_eq!(config.filter(), FlowFilter::AtLeast(10));
    }

    #[test]
    fn set_threshold_feeds_filter() {
        let mut config = Config::default();
        config.set("defaults.threshold", "25").unwrap();
        assert_eq!(config.filter(), FlowFilter::AtLeast(25));
    }

    #[test]
    fn set_filter_all() {
        let mut config = Config::default();
        config.set("defaults.filter", "all").unwrap();
        assert_eq!(config.filter(), FlowFilter::All);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.threshold", "-3").is_err());
        assert!(config.set("defaults.filter", "some").is_err());
        assert!(config.set("defaults.radius", "10").is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("majorflow-config-{}", std::process::id()));
        let path = dir.join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.threshold", "5").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme_name(), "dark");
        assert_eq!(loaded.threshold(), 5);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_suggests_show() {
        let err = Config::load_from(Path::new("/nonexistent/majorflow.yaml")).unwrap_err();
        assert!(err.to_string().contains("config show"));
    }
}
