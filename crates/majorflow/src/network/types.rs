use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in layout space. The layout center is the origin; `y` grows downward
/// on screen, so angles increase clockwise when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle_deg` (degrees) from the origin.
    pub fn from_polar(radius: f64, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self {
            x: radius * rad.cos(),
            y: radius * rad.sin(),
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Move `distance` units along `angle_rad` (radians).
    pub fn offset(self, distance: f64, angle_rad: f64) -> Self {
        Self {
            x: self.x + distance * angle_rad.cos(),
            y: self.y + distance * angle_rad.sin(),
        }
    }

    /// Direction of the segment `self -> other`, in radians.
    pub fn bearing_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// An entity record as supplied by upstream data preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique short code, e.g. `PSYC`.
    pub id: String,
    /// Category code; must appear in the layout's category order.
    pub category: String,
    /// Size driver, e.g. number of graduates.
    #[serde(default)]
    pub weight: u64,
}

/// A directed, pre-aggregated flow between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub source: String,
    pub target: String,
    pub count: u64,
}

/// An entity after layout: angle (degrees) and position are fixed for the
/// lifetime of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntity {
    pub id: String,
    pub category: String,
    pub weight: u64,
    pub angle: f64,
    pub position: Point,
}

/// Undirected aggregate of the flows between two distinct entities.
///
/// Orientation is canonical: `source < target` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub source_to_target: u64,
    pub target_to_source: u64,
    /// Category of the endpoint receiving the larger one-directional flow.
    pub dominant_category: String,
}

impl Edge {
    /// Both directions summed. Edges from `aggregate` never saturate.
    pub fn total(&self) -> u64 {
        self.source_to_target.saturating_add(self.target_to_source)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Label placed at the median angle of a category's members.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub category: String,
    pub text: String,
    pub angle: f64,
    pub position: Point,
}

/// Which way the control point is rotated off the chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveDirection {
    /// Chord midpoint lies inside the node ring: rotate by -90°.
    Inward,
    /// Chord midpoint lies on or outside the node ring: rotate by +90°.
    Outward,
}

impl CurveDirection {
    /// Rotation applied to the chord direction, in degrees.
    pub fn rotation_deg(self) -> f64 {
        match self {
            CurveDirection::Inward => -90.0,
            CurveDirection::Outward => 90.0,
        }
    }
}

impl fmt::Display for CurveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveDirection::Inward => write!(f, "inward"),
            CurveDirection::Outward => write!(f, "outward"),
        }
    }
}

/// Quadratic bezier from `start` through `control` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        Point {
            x: u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x,
            y: u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y,
        }
    }

    /// `segments + 1` evenly spaced points along the curve, endpoints included.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}

/// Routed curve for one edge plus the decisions that shaped it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRoute {
    pub curve: QuadCurve,
    /// Curvature after the collision multiplier.
    pub curvature: f64,
    pub has_collision: bool,
    pub direction: CurveDirection,
}

impl CurveRoute {
    /// Distance from the chord midpoint to the control point.
    pub fn offset(&self) -> f64 {
        self.curve
            .start
            .midpoint(self.curve.end)
            .distance_to(self.curve.control)
    }
}

/// Node record handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDatum {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub weight: u64,
    pub category: String,
    pub color: String,
    pub radius_size: f64,
}

/// Edge record handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDatum {
    pub source: String,
    pub target: String,
    pub flow_source_to_target: u64,
    pub flow_target_to_source: u64,
    pub total_flow: u64,
    pub curvature_base: f64,
    pub dominant_category: String,
    pub color: String,
}

impl EdgeDatum {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Identity used for path caching.
    pub fn key(&self) -> (String, String) {
        (self.source.clone(), self.target.clone())
    }
}

/// Category label record handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDatum {
    pub category: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
}
