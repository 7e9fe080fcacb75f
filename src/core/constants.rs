// Viewport (world units; y grows downward, ground line at the bottom edge)
pub const VIEWPORT_WIDTH: f64 = 1000.0;
pub const VIEWPORT_HEIGHT: f64 = 340.0;

// Scheduler cadences
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
pub const START_RAMP_INTERVAL_MS: f64 = 1000.0 / 60.0;
pub const SCORE_TICK_INTERVAL_MS: f64 = 1000.0 / 10.0;
pub const MAX_FRAME_DT_MS: f64 = 100.0;

// Start ramp
pub const INITIAL_GROUND_WIDTH: f64 = 88.0;
pub const RAMP_GROUND_INCREMENT: f64 = 17.0 * 2.0;
pub const RAMP_VELOCITY_X: f64 = 80.0;

// Start sensor: armed near the top, relocated to the ground line after first contact
pub const START_SENSOR_SIZE: f64 = 32.0;
pub const START_SENSOR_ARMED_Y: f64 = 10.0;

// Player body
pub const PLAYER_WIDTH: f64 = 44.0;
pub const PLAYER_STANDING_HEIGHT: f64 = 92.0;
pub const PLAYER_DUCKING_HEIGHT: f64 = 58.0;
pub const PLAYER_DUCKING_OFFSET_Y: f64 = 34.0;
pub const GRAVITY_Y: f64 = 5000.0;
pub const JUMP_VELOCITY: f64 = -1600.0;

// Run state
pub const INITIAL_SPEED: f64 = 10.0;
pub const SPEED_INCREMENT: f64 = 0.05;
pub const MILESTONE_INTERVAL: u32 = 100;
pub const SCORE_DIGITS: usize = 5;

// Scrolling and spawning
pub const DECORATION_SPEED: f64 = 2.5;
pub const DECORATION_RESPAWN_MARGIN: f64 = 30.0;
pub const RESPAWN_DAMPING: f64 = 0.08;
pub const RESPAWN_THRESHOLD: f64 = 1500.0;
pub const SPAWN_DISTANCE_MIN: f64 = 600.0;
pub const SPAWN_DISTANCE_MAX: f64 = 900.0;
pub const OBSTACLE_CATEGORIES: u8 = 7;
pub const GROUND_OBSTACLE_OFFSET_Y: f64 = 10.0;
pub const FLYING_BANDS: [f64; 2] = [20.0, 50.0];
pub const FLYING_HITBOX_DIVISOR: f64 = 1.5;

// Score flicker: yoyo 1 -> 0 -> 1, four plays
pub const FLICKER_HALF_PERIOD_MS: f64 = 100.0;
pub const FLICKER_PLAYS: u32 = 4;

// Clouds
pub const CLOUD_WIDTH: f64 = 92.0;
pub const CLOUD_HEIGHT: f64 = 27.0;
