//! Terminal rendering for the game.

pub mod layout;
pub mod runner_scene;
