//! Panda Run - A side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `platform`: Host-facing seams (input, HUD, menu overlay, rendering)
//! - `settings`: Data-driven tuning, key bindings and quality presets
//! - `error`: Configuration loading errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Controls, QualityPreset, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh (frames per second)
    pub const FRAME_RATE: f64 = 60.0;
    /// Wall-clock duration of one simulation frame in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level geometry
    pub const BLOCK_SIZE: f32 = 40.0;
    pub const LEVEL_WIDTH: f32 = 7500.0;
    pub const GROUND_TILES: usize = 200;
    pub const WORLD_NAME: &str = "1-1";

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 0.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_BIG_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_POWER: f32 = 15.0;

    /// Physics (units per frame / per frame²)
    pub const GRAVITY: f32 = 0.6;
    pub const FRICTION: f32 = 0.8;
    pub const COIN_GRAVITY: f32 = 0.5;
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    /// Downward velocity after bumping a block from below
    pub const HEAD_BUMP_VELOCITY: f32 = 1.0;
    /// Upward velocity after stomping an enemy
    pub const STOMP_BOUNCE_VELOCITY: f32 = -8.0;
    /// Vertical slack when classifying a stomp
    pub const STOMP_TOLERANCE: f32 = 10.0;

    /// Session defaults
    pub const START_LIVES: u32 = 3;
    pub const TIME_BUDGET: u32 = 300;
    pub const COINS_PER_LIFE: u32 = 100;

    /// Score values
    pub const SCORE_BRICK: u64 = 50;
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_COIN: u64 = 200;
    pub const SCORE_POWER_UP: u64 = 1000;
    pub const SCORE_TIME_BONUS: u64 = 50;

    /// Timed effects (milliseconds of session time)
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;
    pub const DAMAGE_INVINCIBILITY_MS: f64 = 2000.0;
    pub const STAR_INVINCIBILITY_MS: f64 = 10_000.0;

    /// Enemy culling margin around the viewport
    pub const CULL_MARGIN: f32 = 100.0;
    /// Items behind the camera by more than this are dropped
    pub const ITEM_DESPAWN_MARGIN: f32 = 100.0;

    /// Transient effects (frames)
    pub const COIN_EFFECT_LIFE: u32 = 30;
    pub const COIN_EFFECT_VELOCITY: f32 = -8.0;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLES_PER_BURST: usize = 8;
    pub const BLOCK_BOUNCE: f32 = 20.0;
    pub const BLOCK_BOUNCE_DECAY: f32 = 2.0;
    pub const MESSAGE_DURATION: i32 = 120;
    pub const MESSAGE_FADE_FRAMES: i32 = 30;

    /// Landing messages shown on the first two touchdowns
    pub const FIRST_LANDING_TEXT: &str = "Emily Coming";
    pub const SECOND_LANDING_TEXT: &str = "Coming, buddy!";
}
