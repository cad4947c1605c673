use serde::{Deserialize, Serialize};

use super::error::NetworkError;

/// Display attributes of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Code used by entity records, e.g. `SOC`.
    pub code: String,
    /// Label text drawn next to the ring.
    #[serde(default)]
    pub name: String,
    /// Hex color, e.g. `#4E79A7`.
    pub color: String,
}

impl CategoryStyle {
    pub fn new(code: &str, name: &str, color: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Label text, falling back to the code when no name is configured.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Direction in which successive entities are placed around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winding {
    /// `angle = start - i * step`
    #[default]
    Decreasing,
    /// `angle = start + i * step`
    Increasing,
}

impl Winding {
    pub fn sign(self) -> f64 {
        match self {
            Winding::Decreasing => -1.0,
            Winding::Increasing => 1.0,
        }
    }
}

/// Angular-distance tiers that pick an edge's base curvature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureTiers {
    /// Below this angular distance (degrees) an edge is "near".
    pub near_limit: f64,
    /// At or above this angular distance (degrees) an edge is "far".
    pub far_limit: f64,
    pub near: f64,
    pub mid: f64,
    pub far: f64,
}

impl Default for CurvatureTiers {
    fn default() -> Self {
        Self {
            near_limit: 60.0,
            far_limit: 120.0,
            near: 0.5,
            mid: 0.3,
            far: 0.1,
        }
    }
}

/// Immutable parameters for layout, routing and node sizing.
///
/// Built once per dataset load and passed explicitly to every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the node ring in layout units.
    pub radius: f64,
    /// Radius at which category labels are placed.
    pub label_radius: f64,
    /// Angle (degrees) of the first entity.
    pub start_angle: f64,
    pub winding: Winding,
    /// Category order around the ring, with display attributes.
    pub categories: Vec<CategoryStyle>,
    /// Drawn radius of a node with zero weight.
    pub node_radius_min: f64,
    /// Drawn radius of the heaviest node.
    pub node_radius_max: f64,
    /// Midpoint clearance, in layout units, at `reference_radius`.
    pub collision_distance: f64,
    /// Ring radius at which `collision_distance` applies unscaled.
    pub reference_radius: f64,
    /// Curvature multiplier applied when a collision is detected.
    pub collision_multiplier: f64,
    pub curvature: CurvatureTiers,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 250.0,
            label_radius: 300.0,
            start_angle: 180.0,
            winding: Winding::Decreasing,
            categories: vec![
                CategoryStyle::new("HUM", "Humanities", "#E15759"),
                CategoryStyle::new("SOC", "Social Sciences", "#4E79A7"),
                CategoryStyle::new("NAT", "Natural Sciences", "#59A14F"),
                CategoryStyle::new("APP", "Applied Sciences", "#F28E2B"),
            ],
            node_radius_min: 4.0,
            node_radius_max: 20.0,
            collision_distance: 40.0,
            reference_radius: 250.0,
            collision_multiplier: 1.8,
            curvature: CurvatureTiers::default(),
        }
    }
}

impl LayoutConfig {
    /// Reject parameter sets that would produce NaN or degenerate geometry.
    pub fn validate(&self) -> Result<(), NetworkError> {
        let positive = [
            ("radius", self.radius),
            ("label_radius", self.label_radius),
            ("reference_radius", self.reference_radius),
            ("collision_multiplier", self.collision_multiplier),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(NetworkError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.start_angle.is_finite() {
            return Err(NetworkError::InvalidConfig(
                "start_angle must be finite".to_string(),
            ));
        }
        if self.collision_distance < 0.0 {
            return Err(NetworkError::InvalidConfig(
                "collision_distance must not be negative".to_string(),
            ));
        }
        if self.node_radius_min < 0.0 || self.node_radius_min > self.node_radius_max {
            return Err(NetworkError::InvalidConfig(format!(
                "node radius range {}..{} is empty",
                self.node_radius_min, self.node_radius_max
            )));
        }
        let tiers = &self.curvature;
        if tiers.near_limit > tiers.far_limit {
            return Err(NetworkError::InvalidConfig(format!(
                "curvature near_limit {} exceeds far_limit {}",
                tiers.near_limit, tiers.far_limit
            )));
        }
        if self.categories.is_empty() {
            return Err(NetworkError::InvalidConfig(
                "at least one category is required".to_string(),
            ));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.code == category.code) {
                return Err(NetworkError::InvalidConfig(format!(
                    "category '{}' is listed twice",
                    category.code
                )));
            }
        }
        Ok(())
    }

    /// Position of `code` in the category order.
    pub fn category_rank(&self, code: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.code == code)
    }

    pub fn category(&self, code: &str) -> Option<&CategoryStyle> {
        self.categories.iter().find(|c| c.code == code)
    }

    /// Hex color of a category, gray when the category is unknown.
    pub fn category_color(&self, code: &str) -> &str {
        self.category(code).map_or("#9E9E9E", |c| c.color.as_str())
    }

    /// Clearance below which an unrelated node collides with an edge midpoint,
    /// scaled to the configured radius.
    pub fn collision_threshold(&self) -> f64 {
        self.collision_distance * self.radius / self.reference_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn default_collision_threshold_is_forty_units() {
        assert_eq!(LayoutConfig::default().collision_threshold(), 40.0);
    }

    #[test]
    fn collision_threshold_scales_with_radius() {
        let config = LayoutConfig {
            radius: 500.0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.collision_threshold(), 80.0);
    }

    #[test]
    fn rejects_zero_radius() {
        let config = LayoutConfig {
            radius: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NetworkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_duplicate_category() {
        let mut config = LayoutConfig::default();
        config
            .categories
            .push(CategoryStyle::new("SOC", "Again", "#000000"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SOC"));
    }

    #[test]
    fn rejects_empty_categories() {
        let config = LayoutConfig {
            categories: Vec::new(),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("radius: 300\n").unwrap();
        assert_eq!(config.radius, 300.0);
        assert_eq!(config.start_angle, 180.0);
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.curvature, CurvatureTiers::default());
    }

    #[test]
    fn label_falls_back_to_code() {
        let style = CategoryStyle::new("ART", "", "#000000");
        assert_eq!(style.label(), "ART");
    }

    #[test]
    fn unknown_category_color_is_gray() {
        assert_eq!(LayoutConfig::default().category_color("XYZ"), "#9E9E9E");
    }
}
