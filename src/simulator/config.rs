//! Simulation configuration.

use crate::core::constants::FRAME_INTERVAL_MS;
use crate::core::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per run before giving up
    pub max_frames_per_run: u64,

    /// Simulated frame time in milliseconds
    pub frame_ms: f64,

    /// Chance the autopilot ignores an obstacle entirely
    pub fumble_chance: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,

    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 60 * 60 * 10,
            frame_ms: FRAME_INTERVAL_MS,
            fumble_chance: 0.02,
            verbosity: 1,
            game: GameConfig::default(),
        }
    }
}

impl SimConfig {
    /// Small deterministic config for tests and quick checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 5,
            seed: Some(seed),
            max_frames_per_run: 60 * 60 * 2,
            verbosity: 0,
            ..Default::default()
        }
    }
}
