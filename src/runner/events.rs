//! Events produced by a frame tick.
//!
//! The front end maps these to sounds, status messages or effects; the game
//! logic never touches presentation types.

use super::types::{ObstacleKind, Phase};

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A jump was accepted (jump cue).
    Jumped,
    /// The player hit an obstacle and the run ended (failure cue).
    Hit { score: u32 },
    /// Score crossed a multiple of the milestone interval (milestone cue).
    Milestone { score: u32 },
    NewHighScore { value: u32 },
    PhaseChanged { from: Phase, to: Phase },
    ObstacleSpawned { kind: ObstacleKind, x: f64 },
}

impl FrameEvent {
    /// Short text for a status line, or `None` for events not worth showing.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Hit { score } => Some(format!("Crashed at {:05}", score)),
            Self::Milestone { score } => Some(format!("{} points!", score)),
            Self::NewHighScore { value } => Some(format!("New high score: {:05}", value)),
            Self::PhaseChanged { to, .. } => match to {
                Phase::Starting => Some("Get ready...".to_string()),
                Phase::Running => Some("Run!".to_string()),
                _ => None,
            },
            Self::Jumped | Self::ObstacleSpawned { .. } => None,
        }
    }
}
