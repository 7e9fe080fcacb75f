//! Dino Run data structures.
//!
//! World coordinates are in units with y growing downward; the ground line
//! sits at the bottom edge of the viewport. Entities carry their visual
//! placement, and hitboxes are derived from it as plain [`Hitbox`] records.

use super::input::Command;
use super::ticker::FixedTicker;
use crate::core::constants::*;
use crate::core::GameConfig;
use std::collections::VecDeque;

/// Frame loop phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to touch the start sensor.
    Idle,
    /// Ground is widening to the full viewport.
    Starting,
    Running,
    /// Frozen after a collision, waiting for restart.
    GameOver,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::GameOver => "GameOver",
        }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

/// Height and vertical offset of the player's hitbox inside its sprite frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub height: f64,
    pub offset_y: f64,
}

impl BodyShape {
    pub const STANDING: BodyShape = BodyShape {
        height: PLAYER_STANDING_HEIGHT,
        offset_y: 0.0,
    };

    pub const DUCKING: BodyShape = BodyShape {
        height: PLAYER_DUCKING_HEIGHT,
        offset_y: PLAYER_DUCKING_OFFSET_Y,
    };

    pub fn is_ducking(&self) -> bool {
        self.height <= PLAYER_DUCKING_HEIGHT
    }
}

/// Animation/hitbox mode of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    Idle,
    Running,
    Ducking,
    Airborne,
    Hurt,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Left edge.
    pub x: f64,
    /// Feet line (bottom of the sprite frame).
    pub feet_y: f64,
    pub vx: f64,
    /// Vertical velocity in units/s (negative = upward).
    pub vy: f64,
    pub shape: BodyShape,
    pub posture: Posture,
    /// Set by the body integrator when the feet rest on the ground line.
    pub on_floor: bool,
    /// Vertical displacement of the last integration step.
    pub last_delta_y: f64,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: 0.0,
            feet_y: config.viewport_height,
            vx: 0.0,
            vy: 0.0,
            shape: BodyShape::STANDING,
            posture: Posture::Idle,
            on_floor: true,
            last_delta_y: 0.0,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.x,
            self.feet_y - PLAYER_STANDING_HEIGHT + self.shape.offset_y,
            PLAYER_WIDTH,
            self.shape.height,
        )
    }

    pub fn delta_abs_y(&self) -> f64 {
        self.last_delta_y.abs()
    }
}

/// Obstacle variety. Ground variants are numbered 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Ground(u8),
    Flying,
}

impl ObstacleKind {
    /// Map a spawn category (1..=7) to a kind.
    pub fn from_category(category: u8) -> Option<Self> {
        match category {
            1..=6 => Some(Self::Ground(category)),
            7 => Some(Self::Flying),
            _ => None,
        }
    }

    pub fn category(&self) -> u8 {
        match self {
            Self::Ground(variant) => *variant,
            Self::Flying => OBSTACLE_CATEGORIES,
        }
    }

    /// Visual (width, height).
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Ground(1) => (34.0, 70.0),
            Self::Ground(2) => (68.0, 70.0),
            Self::Ground(3) => (102.0, 70.0),
            Self::Ground(4) => (50.0, 100.0),
            Self::Ground(5) => (100.0, 100.0),
            Self::Ground(_) => (150.0, 100.0),
            Self::Flying => (92.0, 80.0),
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Flying)
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge.
    pub x: f64,
    /// Bottom of the visual.
    pub feet_y: f64,
    /// Cleared once the obstacle is culled; dead obstacles are never updated.
    pub alive: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64, feet_y: f64) -> Self {
        Self {
            kind,
            x,
            feet_y,
            alive: true,
        }
    }

    pub fn width(&self) -> f64 {
        self.kind.size().0
    }

    pub fn height(&self) -> f64 {
        self.kind.size().1
    }

    pub fn right(&self) -> f64 {
        self.x + self.width()
    }

    /// Ground obstacles have their hitbox shifted down; flyers get a shorter one.
    pub fn hitbox(&self) -> Hitbox {
        let (width, height) = self.kind.size();
        let top = self.feet_y - height;
        match self.kind {
            ObstacleKind::Ground(_) => {
                Hitbox::new(self.x, top + GROUND_OBSTACLE_OFFSET_Y, width, height)
            }
            ObstacleKind::Flying => {
                Hitbox::new(self.x, top, width, height / FLYING_HITBOX_DIVISOR)
            }
        }
    }
}

/// Background cloud, positioned by its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Decoration {
    pub fn cloud(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: CLOUD_WIDTH,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// The three clouds a game starts with.
    pub fn initial_set(viewport_width: f64) -> Vec<Decoration> {
        vec![
            Self::cloud(viewport_width / 2.0, 170.0),
            Self::cloud(viewport_width - 80.0, 80.0),
            Self::cloud(viewport_width / 1.3, 100.0),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Ground {
    /// Visible width of the ground tile, anchored at x = 0.
    pub width: f64,
    /// Texture scroll offset; grows by the current speed every running frame.
    pub tile_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStage {
    /// Waiting near the top of the world for the first contact.
    Armed,
    /// Moved to the ground line; the next contact starts the ramp.
    Grounded,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct StartSensor {
    pub stage: SensorStage,
    pub hitbox: Hitbox,
}

impl StartSensor {
    pub fn new() -> Self {
        Self {
            stage: SensorStage::Armed,
            hitbox: Self::placed_at(START_SENSOR_ARMED_Y),
        }
    }

    /// Sensor with its bottom-left corner at (0, `bottom`).
    pub fn placed_at(bottom: f64) -> Hitbox {
        Hitbox::new(
            0.0,
            bottom - START_SENSOR_SIZE,
            START_SENSOR_SIZE,
            START_SENSOR_SIZE,
        )
    }
}

impl Default for StartSensor {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run mutable state. Reset when a run ends.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub is_running: bool,
    pub speed: f64,
    pub score: u32,
    pub respawn_accumulator: f64,
}

impl RunState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            is_running: false,
            speed: config.initial_speed,
            score: 0,
            respawn_accumulator: 0.0,
        }
    }

    /// Back to initial values; the run becomes inactive.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct RunnerGame {
    pub config: GameConfig,
    pub phase: Phase,
    pub run: RunState,

    // -- Entities --
    pub player: Player,
    pub ground: Ground,
    /// Active obstacle set.
    pub obstacles: Vec<Obstacle>,
    pub decorations: Vec<Decoration>,
    pub sensor: StartSensor,

    // -- Presentation flags --
    /// Physics, scrolling and animation are paused.
    pub frozen: bool,
    pub overlay_visible: bool,
    pub score_visible: bool,
    pub decorations_visible: bool,
    pub flicker: Option<super::score::ScoreFlicker>,
    /// Score the last run ended with; cleared when a new run starts.
    pub final_score: u32,

    // -- Schedulers --
    /// Present only during the start ramp.
    pub ramp_ticker: Option<FixedTicker>,
    pub score_ticker: FixedTicker,

    /// Pending input, drained at the start of each frame.
    pub commands: VecDeque<Command>,

    // -- Counters --
    pub frame_count: u64,
    pub obstacles_spawned: u64,
}

impl RunnerGame {
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: Phase::Idle,
            run: RunState::new(&config),

            player: Player::new(&config),
            ground: Ground {
                width: config.initial_ground_width.min(config.viewport_width),
                tile_offset: 0.0,
            },
            obstacles: Vec::new(),
            decorations: Decoration::initial_set(config.viewport_width),
            sensor: StartSensor::new(),

            frozen: false,
            overlay_visible: false,
            score_visible: false,
            decorations_visible: false,
            flicker: None,
            final_score: 0,

            ramp_ticker: None,
            score_ticker: FixedTicker::new(SCORE_TICK_INTERVAL_MS),

            commands: VecDeque::new(),

            frame_count: 0,
            obstacles_spawned: 0,
            config,
        }
    }

    /// Queue an input command for the next frame.
    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Score display alpha in [0, 1].
    pub fn score_alpha(&self) -> f64 {
        if !self.score_visible {
            return 0.0;
        }
        self.flicker.as_ref().map_or(1.0, |f| f.alpha())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let game = RunnerGame::new(GameConfig::default());
        assert_eq!(game.phase, Phase::Idle);
        assert!(!game.run.is_running);
        assert!((game.run.speed - 10.0).abs() < f64::EPSILON);
        assert_eq!(game.run.score, 0);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.decorations.len(), 3);
        assert!(!game.overlay_visible);
        assert!(!game.score_visible);
        assert!(game.player.on_floor);
        assert_eq!(game.sensor.stage, SensorStage::Armed);
        assert!(game.ramp_ticker.is_none());
        assert!((game.ground.width - INITIAL_GROUND_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hitbox_overlap_is_strict() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let touching = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        let inside = Hitbox::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_player_hitbox_standing_and_ducking() {
        let mut player = Player::new(&GameConfig::default());
        let standing = player.hitbox();
        assert!((standing.top - (VIEWPORT_HEIGHT - 92.0)).abs() < f64::EPSILON);
        assert!((standing.bottom() - VIEWPORT_HEIGHT).abs() < f64::EPSILON);

        player.shape = BodyShape::DUCKING;
        let ducking = player.hitbox();
        assert!((ducking.height - 58.0).abs() < f64::EPSILON);
        // Ducking keeps the feet on the same line
        assert!((ducking.bottom() - VIEWPORT_HEIGHT).abs() < f64::EPSILON);
        assert!(player.shape.is_ducking());
    }

    #[test]
    fn test_obstacle_kind_categories() {
        for category in 1..=6 {
            let kind = ObstacleKind::from_category(category).unwrap();
            assert_eq!(kind, ObstacleKind::Ground(category));
            assert_eq!(kind.category(), category);
            assert!(!kind.is_flying());
        }
        assert_eq!(ObstacleKind::from_category(7), Some(ObstacleKind::Flying));
        assert_eq!(ObstacleKind::Flying.category(), 7);
        assert!(ObstacleKind::from_category(0).is_none());
        assert!(ObstacleKind::from_category(8).is_none());
    }

    #[test]
    fn test_ground_obstacle_hitbox_shifted_down() {
        let obstacle = Obstacle::new(ObstacleKind::Ground(1), 100.0, VIEWPORT_HEIGHT);
        let hitbox = obstacle.hitbox();
        assert!((hitbox.top - (VIEWPORT_HEIGHT - 70.0 + 10.0)).abs() < f64::EPSILON);
        assert!((hitbox.width - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flying_obstacle_hitbox_is_shortened() {
        let obstacle = Obstacle::new(ObstacleKind::Flying, 100.0, VIEWPORT_HEIGHT - 50.0);
        let hitbox = obstacle.hitbox();
        assert!((hitbox.height - 80.0 / 1.5).abs() < 1e-9);
        assert!((hitbox.top - (VIEWPORT_HEIGHT - 50.0 - 80.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decoration_right_edge() {
        let cloud = Decoration::cloud(100.0, 50.0);
        assert!((cloud.right() - (100.0 + CLOUD_WIDTH / 2.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_state_reset() {
        let config = GameConfig::default();
        let mut run = RunState::new(&config);
        run.is_running = true;
        run.speed = 42.0;
        run.score = 999;
        run.respawn_accumulator = 700.0;
        run.reset(&config);
        assert_eq!(run, RunState::new(&config));
    }

    #[test]
    fn test_score_alpha_hidden_until_visible() {
        let mut game = RunnerGame::new(GameConfig::default());
        assert!(game.score_alpha().abs() < f64::EPSILON);
        game.score_visible = true;
        assert!((game.score_alpha() - 1.0).abs() < f64::EPSILON);
    }
}
