//! Headless simulation runner driving the real frame loop.
//!
//! Runs share one [`Session`], so the high score carries across them the
//! same way it does in interactive play. Statistics are collected from the
//! emitted [`FrameEvent`]s.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunRecord, SimReport};
use crate::core::constants::OBSTACLE_CATEGORIES;
use crate::core::Session;
use crate::runner::{tick, FrameEvent, RunnerGame};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut session = Session::new();
    let mut game = RunnerGame::new(config.game.clone());
    let mut autopilot = Autopilot::new(config.fumble_chance);
    let mut histogram = vec![0u64; OBSTACLE_CATEGORIES as usize];
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let record = simulate_single_run(
            config,
            &mut game,
            &mut session,
            &mut autopilot,
            &mut rng,
            &mut histogram,
        );

        if record.timed_out {
            // No collision to end on; start over from a fresh world
            log::warn!("run {} hit the frame cap", run_idx + 1);
            game = RunnerGame::new(config.game.clone());
            autopilot.reset();
        }

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Score {}, Frames {}, Spawns {}{}",
                run_idx + 1,
                config.num_runs,
                record.score,
                record.frames,
                record.obstacles_spawned,
                if record.timed_out { " (timed out)" } else { "" }
            );
        }
        runs.push(record);
    }

    SimReport::from_runs(runs, histogram, session.high_score.value)
}

/// Play until the next crash or the frame cap.
fn simulate_single_run(
    config: &SimConfig,
    game: &mut RunnerGame,
    session: &mut Session,
    autopilot: &mut Autopilot,
    rng: &mut ChaCha8Rng,
    histogram: &mut [u64],
) -> RunRecord {
    let mut spawned = 0;

    for frame in 1..=config.max_frames_per_run {
        for command in autopilot.decide(game, rng) {
            game.push_command(command);
        }

        for event in tick(game, session, config.frame_ms, rng) {
            match event {
                FrameEvent::ObstacleSpawned { kind, .. } => {
                    spawned += 1;
                    if let Some(slot) = histogram.get_mut(kind.category() as usize - 1) {
                        *slot += 1;
                    }
                }
                FrameEvent::Hit { score } => {
                    return RunRecord {
                        score,
                        frames: frame,
                        timed_out: false,
                        obstacles_spawned: spawned,
                    };
                }
                _ => {}
            }
        }
    }

    RunRecord {
        score: game.run.score,
        frames: config.max_frames_per_run,
        timed_out: true,
        obstacles_spawned: spawned,
    }
}
