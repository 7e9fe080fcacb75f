//! Constants, configuration and session state shared by the game and its front ends.

pub mod config;
pub mod constants;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use session::{HighScore, Session};
