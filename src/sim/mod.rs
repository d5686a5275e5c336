//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One physics step per tick, wall-clock time only for scheduled events
//! - Seeded RNG only
//! - Stable iteration order (container order)
//! - No rendering or platform dependencies

pub mod blocks;
pub mod camera;
pub mod director;
pub mod effects;
pub mod enemy;
pub mod entities;
pub mod geometry;
pub mod items;
pub mod level;
pub mod physics;
pub mod player;
pub mod schedule;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use director::{Director, GameEvent, GamePhase, Scoreboard};
pub use effects::{Effects, LandingMessage};
pub use entities::{
    BlockContent, Brick, CoinEffect, Enemy, EnemyKind, FlagPole, Item, ItemKind, Particle,
    Platform, PlatformKind, QuestionBlock,
};
pub use geometry::{Bounds, Rect, collide, overlaps};
pub use items::ItemManager;
pub use level::Level;
pub use player::Player;
pub use schedule::{TimedEvent, Timeline};
pub use state::{GameState, Hud, RenderView, Viewport};
pub use tick::{TickInput, tick};
