use std::collections::{HashMap, HashSet};

use super::config::LayoutConfig;
use super::error::NetworkError;
use super::types::{CategoryLabel, Entity, PlacedEntity, Point};

/// Entity positions on the ring, in placement order, with an id index.
#[derive(Debug, Clone)]
pub struct Layout {
    entities: Vec<PlacedEntity>,
    index: HashMap<String, usize>,
    radius: f64,
}

impl Layout {
    /// All placed entities in ring order.
    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity, failing instead of fabricating a position.
    pub fn get(&self, id: &str) -> Result<&PlacedEntity, NetworkError> {
        self.index
            .get(id)
            .map(|&i| &self.entities[i])
            .ok_or_else(|| NetworkError::UnknownEntity { id: id.to_string() })
    }

    /// Angular step between neighbours, in degrees.
    pub fn step(&self) -> f64 {
        360.0 / self.entities.len() as f64
    }
}

/// Order entities for placement: by category rank, then by id.
///
/// Rejects an empty set, duplicate ids, and categories missing from the
/// configured order.
pub fn order_entities<'a>(
    entities: &'a [Entity],
    config: &LayoutConfig,
) -> Result<Vec<(usize, &'a Entity)>, NetworkError> {
    if entities.is_empty() {
        return Err(NetworkError::EmptyEntitySet);
    }

    let mut ranked = Vec::with_capacity(entities.len());
    for entity in entities {
        let rank = config
            .category_rank(&entity.category)
            .ok_or_else(|| NetworkError::UnknownCategory {
                entity: entity.id.clone(),
                category: entity.category.clone(),
            })?;
        ranked.push((rank, entity));
    }
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

    let mut seen = HashSet::with_capacity(ranked.len());
    for (_, entity) in &ranked {
        if !seen.insert(entity.id.as_str()) {
            return Err(NetworkError::DuplicateEntity {
                id: entity.id.clone(),
            });
        }
    }

    Ok(ranked)
}

/// Place every entity on the ring.
///
/// The i-th entity in placement order gets `start_angle ± i * 360/n` degrees
/// and sits at `radius` along that angle.
pub fn layout(entities: &[Entity], config: &LayoutConfig) -> Result<Layout, NetworkError> {
    let ordered = order_entities(entities, config)?;
    let step = 360.0 / ordered.len() as f64;
    let sign = config.winding.sign();

    let placed: Vec<PlacedEntity> = ordered
        .into_iter()
        .enumerate()
        .map(|(i, (_, entity))| {
            let angle = config.start_angle + sign * i as f64 * step;
            PlacedEntity {
                id: entity.id.clone(),
                category: entity.category.clone(),
                weight: entity.weight,
                angle,
                position: Point::from_polar(config.radius, angle),
            }
        })
        .collect();

    let index = placed
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.clone(), i))
        .collect();

    log::debug!(
        "placed {} entities, step {:.3} degrees",
        placed.len(),
        step
    );

    Ok(Layout {
        entities: placed,
        index,
        radius: config.radius,
    })
}

/// Median of a run of angles in placement order.
///
/// Odd-sized runs take the middle angle; even-sized runs average the two
/// middle angles. `None` for an empty run.
pub fn median_angle(angles: &[f64]) -> Option<f64> {
    let n = angles.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(angles[n / 2])
    } else {
        Some((angles[n / 2 - 1] + angles[n / 2]) / 2.0)
    }
}

/// One label per non-empty category, at the median member angle and the
/// configured label radius.
pub fn category_labels(layout: &Layout, config: &LayoutConfig) -> Vec<CategoryLabel> {
    config
        .categories
        .iter()
        .filter_map(|style| {
            let angles: Vec<f64> = layout
                .entities()
                .iter()
                .filter(|e| e.category == style.code)
                .map(|e| e.angle)
                .collect();
            let angle = median_angle(&angles)?;
            Some(CategoryLabel {
                category: style.code.clone(),
                text: style.label().to_string(),
                angle,
                position: Point::from_polar(config.label_radius, angle),
            })
        })
        .collect()
}

/// Smaller arc separation between two angles, in `[0, 180]` degrees.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (b - a).abs().rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_run_is_middle() {
        assert_eq!(median_angle(&[180.0, 90.0, 0.0]), Some(90.0));
    }

    #[test]
    fn median_of_even_run_is_mean_of_middle_pair() {
        assert_eq!(median_angle(&[180.0, 90.0, 0.0, -90.0]), Some(45.0));
    }

    #[test]
    fn median_of_single_is_itself() {
        assert_eq!(median_angle(&[42.0]), Some(42.0));
    }

    #[test]
    fn median_of_empty_is_none() {
        assert_eq!(median_angle(&[]), None);
    }

    #[test]
    fn angular_distance_reflects_over_180() {
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(180.0, -90.0), 90.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(30.0, 30.0), 0.0);
    }

    #[test]
    fn angular_distance_is_symmetric() {
        assert_eq!(angular_distance(10.0, 250.0), angular_distance(250.0, 10.0));
    }
}
