//! Level entity definitions
//!
//! Plain data; behaviour lives in the component modules that own each
//! container.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Rect};

/// Debris color for bricks and stomped enemies (saddle brown)
pub const DEBRIS_COLOR: u32 = 0x8B4513;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Grass-topped ground strip
    Ground,
    /// Floating brick ledge
    Floating,
}

/// Solid, immutable level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Breakable brick. Only a big player can break it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub active: bool,
}

impl Bounds for Brick {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// What a question block releases when struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockContent {
    Coin,
    Mushroom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBlock {
    pub rect: Rect,
    pub active: bool,
    pub content: BlockContent,
    /// Render-only vertical offset after a strike, decays to 0
    pub bounce: f32,
}

impl Bounds for QuestionBlock {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walking rat, dies to a single stomp
    Rat,
}

/// A patrolling enemy. Dead enemies stay in the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub kind: EnemyKind,
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Makes the player big
    Mushroom,
    /// Temporary invincibility
    Star,
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Bounds for Item {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Visual-only coin popping out of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinEffect {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: u32,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Frames remaining
    pub life: u32,
}

/// The level goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagPole {
    pub rect: Rect,
    pub reached: bool,
}

impl Bounds for FlagPole {
    fn bounds(&self) -> Rect {
        self.rect
    }
}
