//! Input commands and their guards.

use super::events::FrameEvent;
use super::types::{BodyShape, Phase, Posture, RunnerGame};

/// UI-agnostic input commands, queued and drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,        // Space or Up arrow
    DuckPress,   // Down arrow pressed
    DuckRelease, // Down arrow released
    Restart,     // Restart control
    Accept,      // Enter
}

/// Apply one command. Commands whose guard fails are ignored.
/// Returns true if the command changed the game.
pub fn apply_command(
    game: &mut RunnerGame,
    command: Command,
    events: &mut Vec<FrameEvent>,
) -> bool {
    let accepted = match command {
        Command::Jump => jump(game, events),
        Command::DuckPress => duck(game),
        Command::DuckRelease => stand(game),
        Command::Restart | Command::Accept => restart(game, events),
    };
    if !accepted {
        log::trace!("ignored {:?} in {}", command, game.phase.name());
    }
    accepted
}

fn jump(game: &mut RunnerGame, events: &mut Vec<FrameEvent>) -> bool {
    // Horizontal motion only happens during the start ramp
    if game.frozen || !game.player.on_floor || game.player.vx > 0.0 {
        return false;
    }

    game.player.shape = BodyShape::STANDING;
    game.player.posture = Posture::Airborne;
    game.player.vy = game.config.jump_velocity;
    events.push(FrameEvent::Jumped);
    true
}

fn duck(game: &mut RunnerGame) -> bool {
    if !game.player.on_floor || !game.run.is_running {
        return false;
    }
    game.player.shape = BodyShape::DUCKING;
    true
}

fn stand(game: &mut RunnerGame) -> bool {
    // Keep the game-over hitbox still
    if game.final_score != 0 && !game.run.is_running {
        return false;
    }
    game.player.shape = BodyShape::STANDING;
    true
}

/// Start a fresh run from the game-over screen.
pub fn restart(game: &mut RunnerGame, events: &mut Vec<FrameEvent>) -> bool {
    if !game.overlay_visible || game.run.is_running {
        return false;
    }

    game.player.vy = 0.0;
    game.player.shape = BodyShape::STANDING;
    game.player.posture = Posture::Running;
    game.obstacles.clear();
    game.frozen = false;
    game.run.is_running = true;
    game.overlay_visible = false;
    game.final_score = 0;

    let from = game.phase;
    game.phase = Phase::Running;
    log::info!("run restarted");
    events.push(FrameEvent::PhaseChanged {
        from,
        to: Phase::Running,
    });
    true
}
