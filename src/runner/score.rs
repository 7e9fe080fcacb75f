//! Score and speed accumulation on the fixed score cadence.

use super::events::FrameEvent;
use super::types::RunnerGame;
use crate::core::constants::{FLICKER_HALF_PERIOD_MS, FLICKER_PLAYS, SCORE_DIGITS};

/// Render a score as a zero-padded five-digit field ("00042").
/// Scores past 99999 keep all their digits.
pub fn format_score(score: u32) -> String {
    format!("{:0width$}", score, width = SCORE_DIGITS)
}

/// Milestone blink of the score display: opacity 1 -> 0 -> 1, four times.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFlicker {
    pub elapsed_ms: f64,
}

impl ScoreFlicker {
    pub fn new() -> Self {
        Self { elapsed_ms: 0.0 }
    }

    pub fn duration_ms() -> f64 {
        FLICKER_HALF_PERIOD_MS * 2.0 * FLICKER_PLAYS as f64
    }

    /// Advance; returns false once the flicker has finished.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        self.elapsed_ms < Self::duration_ms()
    }

    pub fn alpha(&self) -> f64 {
        let period = FLICKER_HALF_PERIOD_MS * 2.0;
        let phase = self.elapsed_ms.rem_euclid(period);
        (phase - FLICKER_HALF_PERIOD_MS).abs() / FLICKER_HALF_PERIOD_MS
    }
}

impl Default for ScoreFlicker {
    fn default() -> Self {
        Self::new()
    }
}

/// One score tick: +1 score, +speed increment. No-op while the run is inactive.
pub fn score_tick(game: &mut RunnerGame, events: &mut Vec<FrameEvent>) {
    if !game.run.is_running {
        return;
    }

    game.run.score += 1;
    game.run.speed += game.config.speed_increment;

    if game.run.score.checked_rem(game.config.milestone_interval) == Some(0) {
        log::debug!("milestone reached at {}", game.run.score);
        game.flicker = Some(ScoreFlicker::new());
        events.push(FrameEvent::Milestone {
            score: game.run.score,
        });
    }
}

/// Advance the flicker, dropping it when done.
pub fn update_flicker(game: &mut RunnerGame, dt_ms: f64) {
    if let Some(flicker) = game.flicker.as_mut() {
        if !flicker.advance(dt_ms) {
            game.flicker = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn running_game() -> RunnerGame {
        let mut game = RunnerGame::new(GameConfig::default());
        game.run.is_running = true;
        game
    }

    #[test]
    fn test_format_score_padding() {
        assert_eq!(format_score(0), "00000");
        assert_eq!(format_score(7), "00007");
        assert_eq!(format_score(1234), "01234");
        assert_eq!(format_score(99999), "99999");
        assert_eq!(format_score(123456), "123456");
    }

    #[test]
    fn test_format_score_always_five_chars_in_range() {
        for score in (0..=99_999).step_by(37) {
            assert_eq!(format_score(score).len(), 5);
        }
    }

    #[test]
    fn test_score_tick_increments() {
        let mut game = running_game();
        let mut events = Vec::new();
        score_tick(&mut game, &mut events);
        assert_eq!(game.run.score, 1);
        assert!((game.run.speed - 10.05).abs() < 1e-9);
        assert!(events.is_empty());
    }

    #[test]
    fn test_score_tick_inactive_is_noop() {
        let mut game = RunnerGame::new(GameConfig::default());
        let mut events = Vec::new();
        score_tick(&mut game, &mut events);
        assert_eq!(game.run.score, 0);
        assert!((game.run.speed - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thousand_ticks() {
        let mut game = running_game();
        let mut events = Vec::new();
        for _ in 0..1000 {
            score_tick(&mut game, &mut events);
        }
        assert_eq!(game.run.score, 1000);
        assert!((game.run.speed - 60.0).abs() < 1e-6);
        let milestones = events
            .iter()
            .filter(|e| matches!(e, FrameEvent::Milestone { .. }))
            .count();
        assert_eq!(milestones, 10);
    }

    #[test]
    fn test_milestone_starts_flicker() {
        let mut game = running_game();
        game.score_visible = true;
        game.run.score = 99;
        let mut events = Vec::new();
        score_tick(&mut game, &mut events);
        assert_eq!(events, vec![FrameEvent::Milestone { score: 100 }]);
        assert!(game.flicker.is_some());
        assert!((game.score_alpha() - 1.0).abs() < f64::EPSILON);

        update_flicker(&mut game, 100.0);
        assert!(game.score_alpha() < 1e-9);

        update_flicker(&mut game, 700.0);
        assert!(game.flicker.is_none());
        assert!((game.score_alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flicker_alpha_shape() {
        let mut flicker = ScoreFlicker::new();
        assert!((flicker.alpha() - 1.0).abs() < f64::EPSILON);
        flicker.advance(50.0);
        assert!((flicker.alpha() - 0.5).abs() < 1e-9);
        flicker.advance(100.0);
        assert!((flicker.alpha() - 0.5).abs() < 1e-9);
        assert!((ScoreFlicker::duration_ms() - 800.0).abs() < f64::EPSILON);
    }
}
