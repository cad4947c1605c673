use std::collections::HashMap;

use super::config::{CurvatureTiers, LayoutConfig};
use super::error::NetworkError;
use super::geometry::{Layout, angular_distance};
use super::types::{CurveDirection, CurveRoute, EdgeDatum, Point, QuadCurve};

/// How far apart an edge's endpoints sit on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveTier {
    Near,
    Mid,
    Far,
}

impl CurveTier {
    /// Tier for an edge spanning `angle_diff` degrees of the ring.
    pub fn classify(angle_diff: f64, tiers: &CurvatureTiers) -> Self {
        if angle_diff < tiers.near_limit {
            CurveTier::Near
        } else if angle_diff < tiers.far_limit {
            CurveTier::Mid
        } else {
            CurveTier::Far
        }
    }

    pub fn curvature(self, tiers: &CurvatureTiers) -> f64 {
        match self {
            CurveTier::Near => tiers.near,
            CurveTier::Mid => tiers.mid,
            CurveTier::Far => tiers.far,
        }
    }
}

/// Base curvature for an edge spanning `angle_diff` degrees of the ring.
///
/// Neighbouring nodes get a strong bow so the curve does not collapse onto a
/// chord through their neighbours; opposite nodes get a gentle one.
pub fn base_curvature(angle_diff: f64, tiers: &CurvatureTiers) -> f64 {
    CurveTier::classify(angle_diff, tiers).curvature(tiers)
}

/// Tier of an edge placed on `layout`.
pub fn edge_tier(
    edge: &EdgeDatum,
    layout: &Layout,
    tiers: &CurvatureTiers,
) -> Result<CurveTier, NetworkError> {
    let source = layout.get(&edge.source)?;
    let target = layout.get(&edge.target)?;
    Ok(CurveTier::classify(
        angular_distance(source.angle, target.angle),
        tiers,
    ))
}

/// Base curvature for an edge between entities at the given angles.
pub fn edge_curvature(source_angle: f64, target_angle: f64, tiers: &CurvatureTiers) -> f64 {
    base_curvature(angular_distance(source_angle, target_angle), tiers)
}

/// Route a single quadratic curve between two points.
///
/// `obstacles` are the positions of every entity other than the two
/// endpoints. If any lies closer than the collision threshold to the chord
/// midpoint, the curvature is multiplied once by the collision multiplier.
/// The control point is offset perpendicular to the chord by
/// `chord length * curvature`: rotated -90° when the midpoint is inside the
/// ring, +90° otherwise.
pub fn route_curve<I>(
    source: Point,
    target: Point,
    curvature_base: f64,
    obstacles: I,
    config: &LayoutConfig,
) -> CurveRoute
where
    I: IntoIterator<Item = Point>,
{
    let mid = source.midpoint(target);
    let dist = source.distance_to(target);
    let chord_angle = source.bearing_to(target);

    let threshold = config.collision_threshold();
    let has_collision = obstacles
        .into_iter()
        .any(|p| p.distance_to(mid) < threshold);

    let curvature = if has_collision {
        curvature_base * config.collision_multiplier
    } else {
        curvature_base
    };

    let direction = if mid.distance_to(Point::ORIGIN) < config.radius {
        CurveDirection::Inward
    } else {
        CurveDirection::Outward
    };

    let perp_angle = chord_angle + direction.rotation_deg().to_radians();
    let control = mid.offset(dist * curvature, perp_angle);

    CurveRoute {
        curve: QuadCurve {
            start: source,
            control,
            end: target,
        },
        curvature,
        has_collision,
        direction,
    }
}

/// Route an edge against the full layout.
///
/// Fails if either endpoint is missing from the layout.
pub fn edge_path(
    edge: &EdgeDatum,
    layout: &Layout,
    config: &LayoutConfig,
) -> Result<CurveRoute, NetworkError> {
    let source = layout.get(&edge.source)?;
    let target = layout.get(&edge.target)?;

    let obstacles = layout
        .entities()
        .iter()
        .filter(|e| e.id != source.id && e.id != target.id)
        .map(|e| e.position);

    let route = route_curve(
        source.position,
        target.position,
        edge.curvature_base,
        obstacles,
        config,
    );

    if route.has_collision {
        log::trace!(
            "{} -> {}: midpoint collision, curvature raised to {:.2}",
            edge.source,
            edge.target,
            route.curvature
        );
    }

    Ok(route)
}

/// Memoised routes keyed by edge identity.
///
/// Valid only while entity positions stay fixed; call [`PathCache::clear`]
/// after a new layout.
#[derive(Debug, Default, Clone)]
pub struct PathCache {
    routes: HashMap<(String, String), CurveRoute>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached route for `edge`, routing it on first use.
    pub fn get_or_route(
        &mut self,
        edge: &EdgeDatum,
        layout: &Layout,
        config: &LayoutConfig,
    ) -> Result<CurveRoute, NetworkError> {
        let key = edge.key();
        if let Some(route) = self.routes.get(&key) {
            return Ok(*route);
        }
        let route = edge_path(edge, layout, config)?;
        self.routes.insert(key, route);
        Ok(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }
}
