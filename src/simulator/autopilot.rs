//! Scripted player for headless runs.
//!
//! Jumps ground obstacles and low flyers when they enter a speed-scaled
//! window, ducks under high flyers, and occasionally fumbles an obstacle so
//! runs end.

use crate::core::constants::{PLAYER_DUCKING_OFFSET_Y, PLAYER_STANDING_HEIGHT};
use crate::runner::{Command, Phase, RunnerGame};
use rand::Rng;
use std::collections::HashMap;

/// Frames of lead before a jump, scaled by speed (units/frame).
const JUMP_LEAD_FRAMES: f64 = 7.0;
const JUMP_MARGIN: f64 = 10.0;
const DUCK_LEAD_FRAMES: f64 = 10.0;
const DUCK_MARGIN: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    fumble_chance: f64,
    /// Fumble decision per obstacle, keyed by spawn ordinal.
    fumbles: HashMap<u64, bool>,
}

impl Autopilot {
    /// Non-finite chances are treated as zero.
    pub fn new(fumble_chance: f64) -> Self {
        let fumble_chance = if fumble_chance.is_finite() {
            fumble_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            fumble_chance,
            fumbles: HashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.fumbles.clear();
    }

    /// Commands to queue before the next frame.
    pub fn decide<R: Rng>(&mut self, game: &RunnerGame, rng: &mut R) -> Vec<Command> {
        match game.phase {
            Phase::Idle if game.player.on_floor => vec![Command::Jump],
            Phase::Idle | Phase::Starting => Vec::new(),
            Phase::GameOver => {
                self.reset();
                if game.overlay_visible {
                    vec![Command::Accept]
                } else {
                    Vec::new()
                }
            }
            Phase::Running => self.steer(game, rng),
        }
    }

    fn steer<R: Rng>(&mut self, game: &RunnerGame, rng: &mut R) -> Vec<Command> {
        let player = &game.player;
        let hitbox = player.hitbox();
        let ducking = player.shape.is_ducking();
        let speed = game.run.speed;

        // Obstacles sit in spawn order; culling only removes from the front
        let first_ordinal = game
            .obstacles_spawned
            .saturating_sub(game.obstacles.len() as u64);
        self.fumbles.retain(|ordinal, _| *ordinal >= first_ordinal);

        let target = game
            .obstacles
            .iter()
            .enumerate()
            .find(|(_, o)| o.alive && o.right() > hitbox.left);

        let Some((index, obstacle)) = target else {
            return if ducking {
                vec![Command::DuckRelease]
            } else {
                Vec::new()
            };
        };

        let ordinal = first_ordinal + index as u64;
        let chance = self.fumble_chance;
        let fumble = *self
            .fumbles
            .entry(ordinal)
            .or_insert_with(|| rng.gen_bool(chance));
        if fumble {
            return Vec::new();
        }

        let distance = obstacle.x - hitbox.right();
        let duck_top = player.feet_y - PLAYER_STANDING_HEIGHT + PLAYER_DUCKING_OFFSET_Y;
        let high_flyer = obstacle.kind.is_flying() && obstacle.hitbox().bottom() <= duck_top;

        let mut commands = Vec::new();
        if high_flyer {
            let window = speed * DUCK_LEAD_FRAMES + DUCK_MARGIN;
            if distance < window && !ducking && player.on_floor {
                commands.push(Command::DuckPress);
            }
        } else {
            if ducking {
                commands.push(Command::DuckRelease);
            }
            let window = speed * JUMP_LEAD_FRAMES + JUMP_MARGIN;
            if distance < window && player.on_floor {
                commands.push(Command::Jump);
            }
        }
        commands
    }
}
