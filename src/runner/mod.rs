//! Dino Run: an endless runner.
//!
//! The runner jumps over ground obstacles and ducks under flyers while the
//! world scrolls ever faster. All state changes happen inside
//! [`frame::tick`], driven by queued [`Command`]s and elapsed time.

pub mod body;
pub mod collision;
pub mod events;
pub mod frame;
pub mod input;
pub mod score;
pub mod spawner;
pub mod ticker;
pub mod types;

pub use events::FrameEvent;
pub use frame::tick;
pub use input::Command;
pub use score::format_score;
pub use types::*;
