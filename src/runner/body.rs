//! Arcade body integration for the player: gravity, world bounds, grounded state.

use super::types::Player;
use crate::core::constants::PLAYER_WIDTH;
use crate::core::GameConfig;

/// Longest single integration step (seconds).
const MAX_STEP_S: f64 = 1.0 / 60.0;

/// Advance the player body by `dt_s` seconds, in steps no longer than 1/60s.
pub fn integrate(player: &mut Player, config: &GameConfig, dt_s: f64) {
    let prev_feet = player.feet_y;
    if dt_s > 0.0 {
        let steps = (dt_s / MAX_STEP_S).ceil().max(1.0);
        let step_s = dt_s / steps;
        for _ in 0..steps as u32 {
            integrate_step(player, config, step_s);
        }
    }
    player.last_delta_y = player.feet_y - prev_feet;
}

fn integrate_step(player: &mut Player, config: &GameConfig, dt_s: f64) {
    player.vy += config.gravity_y * dt_s;
    player.x += player.vx * dt_s;
    player.feet_y += player.vy * dt_s;
    player.on_floor = false;

    // Ground line
    if player.feet_y >= config.viewport_height {
        player.feet_y = config.viewport_height;
        if player.vy > 0.0 {
            player.vy = 0.0;
        }
        player.on_floor = true;
    }

    // Ceiling: the hitbox top may not leave the world
    let top = player.hitbox().top;
    if top < 0.0 {
        player.feet_y -= top;
        if player.vy < 0.0 {
            player.vy = 0.0;
        }
    }

    // Side bounds
    let max_x = (config.viewport_width - PLAYER_WIDTH).max(0.0);
    if player.x < 0.0 || player.x > max_x {
        player.x = player.x.clamp(0.0, max_x);
        player.vx = 0.0;
    }
}
