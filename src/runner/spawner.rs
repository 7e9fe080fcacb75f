//! Obstacle spawning.

use super::types::{Obstacle, ObstacleKind};
use crate::core::constants::OBSTACLE_CATEGORIES;
use crate::core::GameConfig;
use rand::Rng;

/// Draw one obstacle just past the right edge of the viewport.
///
/// Category 1..=6 picks a ground variant, 7 a flyer placed in one of the two
/// altitude bands. The horizontal gap past the viewport edge is drawn from
/// the configured distance range, so spacing never depends on speed.
pub fn spawn_obstacle<R: Rng>(config: &GameConfig, rng: &mut R) -> Obstacle {
    let category = rng.gen_range(1..=OBSTACLE_CATEGORIES);
    let distance = rng.gen_range(config.spawn_distance_min..config.spawn_distance_max);
    let x = config.viewport_width + distance;

    let kind = ObstacleKind::from_category(category).unwrap_or(ObstacleKind::Ground(1));
    let feet_y = if kind.is_flying() {
        let band = config.flying_bands[rng.gen_range(0..config.flying_bands.len())];
        config.viewport_height - band
    } else {
        config.viewport_height
    };

    Obstacle::new(kind, x, feet_y)
}
