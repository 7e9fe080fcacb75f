//! The per-frame update: phase machine, scrolling, spawning and culling.

use super::body;
use super::collision;
use super::events::FrameEvent;
use super::input::apply_command;
use super::score::{score_tick, update_flicker};
use super::spawner::spawn_obstacle;
use super::ticker::FixedTicker;
use super::types::{Phase, Posture, RunnerGame, SensorStage, StartSensor};
use crate::core::constants::{DECORATION_RESPAWN_MARGIN, MAX_FRAME_DT_MS, START_RAMP_INTERVAL_MS};
use crate::core::Session;
use rand::Rng;

/// Advance the game by one frame of `dt_ms` milliseconds.
///
/// Order within a frame: queued commands, fixed-cadence schedulers (start
/// ramp, score), body integration, then scroll/spawn/cull/posture and
/// finally collision. A collision freezes everything after it until restart.
pub fn tick<R: Rng>(
    game: &mut RunnerGame,
    session: &mut Session,
    dt_ms: f64,
    rng: &mut R,
) -> Vec<FrameEvent> {
    // Clamp dt so a stalled terminal doesn't teleport everything
    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
    let mut events = Vec::new();
    game.frame_count += 1;

    while let Some(command) = game.commands.pop_front() {
        apply_command(game, command, &mut events);
    }

    advance_start_ramp(game, dt_ms, &mut events);
    game.score_ticker.advance(dt_ms);
    while game.score_ticker.next_tick() {
        score_tick(game, &mut events);
    }
    update_flicker(game, dt_ms);

    if game.frozen {
        return events;
    }

    body::integrate(&mut game.player, &game.config, dt_ms / 1000.0);

    match game.phase {
        Phase::Idle => {
            check_start_sensor(game, &mut events);
            game.player.posture = if game.player.delta_abs_y() > 0.0 {
                Posture::Airborne
            } else {
                Posture::Idle
            };
        }
        Phase::Running if game.run.is_running => {
            scroll_world(game, dt_ms, rng, &mut events);
            collision::evaluate(game, session, &mut events);
        }
        _ => {}
    }

    events
}

/// Idle: first contact moves the sensor to the ground, second contact starts the ramp.
fn check_start_sensor(game: &mut RunnerGame, events: &mut Vec<FrameEvent>) {
    let touching = game.sensor.hitbox.overlaps(&game.player.hitbox());
    if !touching {
        return;
    }

    match game.sensor.stage {
        SensorStage::Armed => {
            game.sensor.hitbox = StartSensor::placed_at(game.config.viewport_height);
            game.sensor.stage = SensorStage::Grounded;
            log::debug!("start sensor moved to ground line");
        }
        SensorStage::Grounded => {
            game.sensor.stage = SensorStage::Disabled;
            game.ramp_ticker = Some(FixedTicker::new(START_RAMP_INTERVAL_MS));
            game.phase = Phase::Starting;
            log::info!("start ramp begun");
            events.push(FrameEvent::PhaseChanged {
                from: Phase::Idle,
                to: Phase::Starting,
            });
        }
        SensorStage::Disabled => {}
    }
}

fn advance_start_ramp(game: &mut RunnerGame, dt_ms: f64, events: &mut Vec<FrameEvent>) {
    match game.ramp_ticker.as_mut() {
        Some(ticker) => ticker.advance(dt_ms),
        None => return,
    }
    while game.ramp_ticker.as_mut().is_some_and(|t| t.next_tick()) {
        ramp_tick(game, events);
    }
}

/// One start-ramp tick: push the runner forward and widen the ground.
/// Cancels its own ticker once the ground spans the viewport.
pub fn ramp_tick(game: &mut RunnerGame, events: &mut Vec<FrameEvent>) {
    let viewport_width = game.config.viewport_width;
    game.player.vx = game.config.ramp_velocity_x;
    game.player.posture = Posture::Running;

    if game.ground.width < viewport_width {
        game.ground.width += game.config.ramp_ground_increment;
    }

    if game.ground.width >= viewport_width {
        game.ground.width = viewport_width;
        game.run.is_running = true;
        game.player.vx = 0.0;
        game.score_visible = true;
        game.decorations_visible = true;
        game.ramp_ticker = None;

        let from = game.phase;
        game.phase = Phase::Running;
        log::info!("run started");
        events.push(FrameEvent::PhaseChanged {
            from,
            to: Phase::Running,
        });
    }
}

fn scroll_world<R: Rng>(
    game: &mut RunnerGame,
    dt_ms: f64,
    rng: &mut R,
    events: &mut Vec<FrameEvent>,
) {
    let speed = game.run.speed;
    game.ground.tile_offset += speed;

    for obstacle in game.obstacles.iter_mut().filter(|o| o.alive) {
        obstacle.x -= speed;
    }
    for decoration in &mut game.decorations {
        decoration.x -= game.config.decoration_speed;
    }

    // Virtual distance since the last spawn
    game.run.respawn_accumulator += dt_ms * speed * game.config.respawn_damping;
    if game.run.respawn_accumulator >= game.config.respawn_threshold {
        let obstacle = spawn_obstacle(&game.config, rng);
        log::debug!("spawned {:?} at x={:.0}", obstacle.kind, obstacle.x);
        events.push(FrameEvent::ObstacleSpawned {
            kind: obstacle.kind,
            x: obstacle.x,
        });
        game.obstacles.push(obstacle);
        game.obstacles_spawned += 1;
        game.run.respawn_accumulator = 0.0;
    }

    cull_obstacles(game);

    game.player.posture = if game.player.delta_abs_y() > 0.0 {
        Posture::Airborne
    } else if game.player.shape.is_ducking() {
        Posture::Ducking
    } else {
        Posture::Running
    };

    let respawn_x = game.config.viewport_width + DECORATION_RESPAWN_MARGIN;
    for decoration in &mut game.decorations {
        if decoration.right() < 0.0 {
            decoration.x = respawn_x;
        }
    }
}

/// Drop obstacles whose right edge has passed the left viewport edge.
/// Returns how many were removed.
pub fn cull_obstacles(game: &mut RunnerGame) -> usize {
    for obstacle in game.obstacles.iter_mut() {
        if obstacle.alive && obstacle.right() < 0.0 {
            obstacle.alive = false;
        }
    }
    let before = game.obstacles.len();
    game.obstacles.retain(|o| o.alive);
    let removed = before - game.obstacles.len();
    if removed > 0 {
        log::debug!("culled {} obstacle(s)", removed);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::core::GameConfig;
    use crate::runner::input::Command;
    use crate::runner::types::{Obstacle, ObstacleKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f64 = FRAME_INTERVAL_MS;

    fn running_game() -> RunnerGame {
        let mut game = RunnerGame::new(GameConfig::default());
        game.ground.width = game.config.viewport_width;
        game.phase = Phase::Running;
        game.run.is_running = true;
        game.score_visible = true;
        game.decorations_visible = true;
        game.sensor.stage = SensorStage::Disabled;
        game
    }

    #[test]
    fn test_idle_does_not_scroll() {
        let mut game = RunnerGame::new(GameConfig::default());
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..120 {
            tick(&mut game, &mut session, DT, &mut rng);
        }
        assert_eq!(game.phase, Phase::Idle);
        assert!(game.ground.tile_offset.abs() < f64::EPSILON);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.run.score, 0);
        assert_eq!(game.player.posture, Posture::Idle);
    }

    #[test]
    fn test_jump_into_sensor_starts_ramp() {
        let mut game = RunnerGame::new(GameConfig::default());
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(1);

        game.push_command(Command::Jump);
        let mut phases = Vec::new();
        for _ in 0..60 {
            for event in tick(&mut game, &mut session, DT, &mut rng) {
                if let FrameEvent::PhaseChanged { to, .. } = event {
                    phases.push(to);
                }
            }
            if game.phase != Phase::Idle {
                break;
            }
        }
        assert_eq!(phases, vec![Phase::Starting]);
        assert_eq!(game.sensor.stage, SensorStage::Disabled);
        assert!(game.ramp_ticker.is_some());
    }

    #[test]
    fn test_ramp_widens_ground_then_runs_once() {
        let mut game = RunnerGame::new(GameConfig::default());
        game.phase = Phase::Starting;
        let mut events = Vec::new();
        let mut last_width = game.ground.width;
        let mut ticks = 0;

        while game.phase == Phase::Starting {
            ramp_tick(&mut game, &mut events);
            ticks += 1;
            if game.phase == Phase::Starting {
                assert!((game.ground.width - last_width - RAMP_GROUND_INCREMENT).abs() < 1e-9);
                assert!(game.player.vx > 0.0);
            }
            last_width = game.ground.width;
        }

        // (1000 - 88) / 34 rounds up to 27 ticks
        assert_eq!(ticks, 27);
        assert!((game.ground.width - VIEWPORT_WIDTH).abs() < f64::EPSILON);
        assert!(game.run.is_running);
        assert!(game.player.vx.abs() < f64::EPSILON);
        assert!(game.score_visible);
        assert!(game.ramp_ticker.is_none());
        let transitions = events
            .iter()
            .filter(|e| matches!(e, FrameEvent::PhaseChanged { to: Phase::Running, .. }))
            .count();
        assert_eq!(transitions, 1);
    }

    #[test]
    fn test_ramp_through_frames_transitions_exactly_once() {
        let mut game = RunnerGame::new(GameConfig::default());
        game.phase = Phase::Starting;
        game.sensor.stage = SensorStage::Disabled;
        game.ramp_ticker = Some(FixedTicker::new(START_RAMP_INTERVAL_MS));
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(5);

        let mut running_transitions = 0;
        for _ in 0..200 {
            for event in tick(&mut game, &mut session, DT, &mut rng) {
                if matches!(event, FrameEvent::PhaseChanged { to: Phase::Running, .. }) {
                    running_transitions += 1;
                }
            }
        }
        assert_eq!(running_transitions, 1);
        assert!(game.ground.width <= VIEWPORT_WIDTH);
    }

    #[test]
    fn test_scroll_moves_obstacles_and_ground() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(2);
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Ground(3), 800.0, VIEWPORT_HEIGHT));
        let cloud_x = game.decorations[0].x;

        tick(&mut game, &mut session, DT, &mut rng);

        assert!((game.ground.tile_offset - 10.0).abs() < f64::EPSILON);
        assert!((game.obstacles[0].x - 790.0).abs() < f64::EPSILON);
        assert!((game.decorations[0].x - (cloud_x - DECORATION_SPEED)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_respawn_accumulator_triggers_spawn() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(3);
        game.run.respawn_accumulator = RESPAWN_THRESHOLD - 1.0;

        let events = tick(&mut game, &mut session, DT, &mut rng);

        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.obstacles_spawned, 1);
        assert!(game.run.respawn_accumulator.abs() < f64::EPSILON);
        assert!(events
            .iter()
            .any(|e| matches!(e, FrameEvent::ObstacleSpawned { .. })));
    }

    #[test]
    fn test_respawn_accumulator_growth() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(3);

        tick(&mut game, &mut session, 10.0, &mut rng);
        // 10ms * speed 10 * 0.08
        assert!((game.run.respawn_accumulator - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_culled_obstacle_is_gone_for_good() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(4);
        // Right edge at -1 after the next scroll
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Ground(1), -25.0, VIEWPORT_HEIGHT));
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Ground(1), 700.0, VIEWPORT_HEIGHT));

        tick(&mut game, &mut session, DT, &mut rng);
        assert_eq!(game.obstacles.len(), 1);
        assert!((game.obstacles[0].x - 690.0).abs() < f64::EPSILON);

        assert_eq!(cull_obstacles(&mut game), 0);
        assert_eq!(game.obstacles.len(), 1);
    }

    #[test]
    fn test_decorations_recycle_past_right_edge() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(4);
        game.decorations[1].x = -CLOUD_WIDTH / 2.0 + 1.0;

        tick(&mut game, &mut session, DT, &mut rng);
        assert!(
            (game.decorations[1].x - (VIEWPORT_WIDTH + DECORATION_RESPAWN_MARGIN)).abs()
                < f64::EPSILON
        );
        assert_eq!(game.decorations.len(), 3);
    }

    #[test]
    fn test_posture_follows_body() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(6);

        tick(&mut game, &mut session, DT, &mut rng);
        assert_eq!(game.player.posture, Posture::Running);

        game.push_command(Command::DuckPress);
        tick(&mut game, &mut session, DT, &mut rng);
        assert_eq!(game.player.posture, Posture::Ducking);

        game.push_command(Command::Jump);
        tick(&mut game, &mut session, DT, &mut rng);
        assert_eq!(game.player.posture, Posture::Airborne);
    }

    #[test]
    fn test_collision_freezes_world() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(8);
        game.run.score = 77;
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Ground(2), 20.0, VIEWPORT_HEIGHT));

        let events = tick(&mut game, &mut session, DT, &mut rng);
        assert!(events.contains(&FrameEvent::Hit { score: 77 }));
        assert_eq!(game.phase, Phase::GameOver);

        let offset = game.ground.tile_offset;
        let obstacle_x = game.obstacles[0].x;
        for _ in 0..30 {
            let events = tick(&mut game, &mut session, DT, &mut rng);
            assert!(events.is_empty());
        }
        assert!((game.ground.tile_offset - offset).abs() < f64::EPSILON);
        assert!((game.obstacles[0].x - obstacle_x).abs() < f64::EPSILON);
        assert_eq!(game.run.score, 0);
        assert_eq!(session.high_score.value, 77);
    }

    #[test]
    fn test_commands_drain_in_order() {
        let mut game = running_game();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(9);
        game.push_command(Command::DuckPress);
        game.push_command(Command::DuckRelease);

        tick(&mut game, &mut session, DT, &mut rng);
        assert!(game.commands.is_empty());
        assert!(!game.player.shape.is_ducking());
    }
}
