//! Player/obstacle collision and the end-of-run handler.

use super::events::FrameEvent;
use super::types::{Hitbox, Obstacle, Phase, Posture, RunnerGame};
use crate::core::Session;

/// Index of the first live obstacle overlapping `player`.
pub fn find_collision(player: &Hitbox, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| o.alive && o.hitbox().overlaps(player))
}

/// End the current run. Returns false (and does nothing) if no run is active.
pub fn end_run(
    game: &mut RunnerGame,
    session: &mut Session,
    events: &mut Vec<FrameEvent>,
) -> bool {
    if !game.run.is_running {
        return false;
    }

    let score = game.run.score;
    let improved = session.finish_run(score);

    game.frozen = true;
    game.player.posture = Posture::Hurt;
    game.run.reset(&game.config);
    game.overlay_visible = true;
    game.flicker = None;
    game.final_score = score;

    let from = game.phase;
    game.phase = Phase::GameOver;

    log::info!(
        "run ended: score {} (high {})",
        score,
        session.high_score.value
    );
    events.push(FrameEvent::Hit { score });
    if improved {
        log::info!("new high score {}", score);
        events.push(FrameEvent::NewHighScore { value: score });
    }
    events.push(FrameEvent::PhaseChanged {
        from,
        to: Phase::GameOver,
    });
    true
}

/// Check the player against the active obstacle set and end the run on contact.
pub fn evaluate(
    game: &mut RunnerGame,
    session: &mut Session,
    events: &mut Vec<FrameEvent>,
) -> bool {
    if game.frozen || !game.run.is_running {
        return false;
    }
    let player = game.player.hitbox();
    match find_collision(&player, &game.obstacles) {
        Some(index) => {
            log::debug!("collision with {:?}", game.obstacles[index].kind);
            end_run(game, session, events)
        }
        None => false,
    }
}
