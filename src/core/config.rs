//! Tunable game parameters, loadable from JSON.
//!
//! Every field falls back to its default from [`super::constants`], so a
//! config file only needs the values it wants to change.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = ".dinorun";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub initial_ground_width: f64,
    pub ramp_ground_increment: f64,
    pub ramp_velocity_x: f64,
    pub gravity_y: f64,
    pub jump_velocity: f64,
    pub initial_speed: f64,
    pub speed_increment: f64,
    pub decoration_speed: f64,
    pub respawn_damping: f64,
    pub respawn_threshold: f64,
    pub spawn_distance_min: f64,
    pub spawn_distance_max: f64,
    pub flying_bands: [f64; 2],
    pub milestone_interval: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            initial_ground_width: INITIAL_GROUND_WIDTH,
            ramp_ground_increment: RAMP_GROUND_INCREMENT,
            ramp_velocity_x: RAMP_VELOCITY_X,
            gravity_y: GRAVITY_Y,
            jump_velocity: JUMP_VELOCITY,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            decoration_speed: DECORATION_SPEED,
            respawn_damping: RESPAWN_DAMPING,
            respawn_threshold: RESPAWN_THRESHOLD,
            spawn_distance_min: SPAWN_DISTANCE_MIN,
            spawn_distance_max: SPAWN_DISTANCE_MAX,
            flying_bands: FLYING_BANDS,
            milestone_interval: MILESTONE_INTERVAL,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. Missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `~/.dinorun/config.json`, falling back to defaults when absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from `path` if given, otherwise from the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.spawn_distance_min >= self.spawn_distance_max {
            return Err(ConfigError::Invalid(format!(
                "spawn distance range {}..{} is empty",
                self.spawn_distance_min, self.spawn_distance_max
            )));
        }
        if self.respawn_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "respawn threshold must be positive".to_string(),
            ));
        }
        if self.ramp_ground_increment <= 0.0 {
            return Err(ConfigError::Invalid(
                "ramp ground increment must be positive".to_string(),
            ));
        }
        if self.gravity_y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity must be positive, got {}",
                self.gravity_y
            )));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "jump velocity must point up (negative), got {}",
                self.jump_velocity
            )));
        }
        if self.initial_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial speed must be positive, got {}",
                self.initial_speed
            )));
        }
        if self.flying_bands.iter().any(|band| band.is_nan() || *band < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "flying bands must be non-negative, got {:?}",
                self.flying_bands
            )));
        }
        if self.milestone_interval == 0 {
            return Err(ConfigError::Invalid(
                "milestone interval must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

/// `~/.dinorun/config.json`, or `None` when the home directory is unknown.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}
