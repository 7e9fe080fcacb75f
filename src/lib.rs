//! Dino Run - Terminal Endless Runner Library
//!
//! This module exposes the game logic for testing and external use.

pub mod core;
pub mod runner;
pub mod simulator;

pub use crate::core::{GameConfig, HighScore, Session};
pub use runner::{Command, FrameEvent, Phase, RunnerGame};
