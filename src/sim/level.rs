//! Level layout
//!
//! The level is a fixed layout anchored to the bottom of the viewport: every
//! y coordinate is measured up from the viewport height, so a resize shifts
//! the whole level vertically by the height delta.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{
    BlockContent, Brick, Enemy, FlagPole, Platform, PlatformKind, QuestionBlock,
};
use super::geometry::Rect;
use crate::consts::*;

/// Gaps in the ground strip as (x, width)
pub const PITS: [(f32, f32); 3] = [(3400.0, 200.0), (4800.0, 150.0), (6000.0, 180.0)];

/// Question blocks as (x, height above the viewport bottom in blocks)
const QUESTION_BLOCKS: [(f32, f32); 7] = [
    (400.0, 8.0),
    (600.0, 8.0),
    (1000.0, 6.0),
    (1400.0, 9.0),
    (1800.0, 7.0),
    (2200.0, 8.0),
    (2600.0, 10.0),
];

const ENEMY_SPAWNS: [f32; 8] = [700.0, 1200.0, 1600.0, 2000.0, 2400.0, 2800.0, 3200.0, 3600.0];

const FLOATING_RUNS: usize = 5;
const FLOATING_RUN_TILES: usize = 3;
const BRICK_COUNT: usize = 10;
const FLAG_X: f32 = 7000.0;
const FLAG_WIDTH: f32 = 10.0;
const FLAG_HEIGHT: f32 = 200.0;

/// Static and interactive level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub bricks: Vec<Brick>,
    pub question_blocks: Vec<QuestionBlock>,
    pub flag_pole: FlagPole,
}

/// Top of the ground strip for a viewport of the given height
pub fn ground_top(viewport_height: f32) -> f32 {
    viewport_height - BLOCK_SIZE * 2.0
}

fn in_pit(x: f32, width: f32) -> bool {
    PITS.iter()
        .any(|&(pit_x, pit_w)| x < pit_x + pit_w && x + width > pit_x)
}

impl Level {
    /// Lay out the level for a viewport of `viewport_height`.
    ///
    /// Only question block contents are random; the first block always
    /// holds a coin.
    pub fn build(viewport_height: f32, rng: &mut impl Rng) -> Self {
        let h = viewport_height;
        let mut platforms = Vec::with_capacity(GROUND_TILES + FLOATING_RUNS * FLOATING_RUN_TILES);

        for i in 0..GROUND_TILES {
            let x = i as f32 * BLOCK_SIZE;
            if in_pit(x, BLOCK_SIZE) {
                continue;
            }
            platforms.push(Platform {
                rect: Rect::new(x, ground_top(h), BLOCK_SIZE, BLOCK_SIZE * 2.0),
                kind: PlatformKind::Ground,
            });
        }

        for run in 0..FLOATING_RUNS {
            let start_x = 300.0 + run as f32 * 400.0;
            let y = h - BLOCK_SIZE * 5.0 - run as f32 * 30.0;
            for tile in 0..FLOATING_RUN_TILES {
                platforms.push(Platform {
                    rect: Rect::new(start_x + tile as f32 * BLOCK_SIZE, y, BLOCK_SIZE, BLOCK_SIZE),
                    kind: PlatformKind::Floating,
                });
            }
        }

        let bricks = (0..BRICK_COUNT)
            .map(|i| Brick {
                rect: Rect::new(
                    500.0 + i as f32 * BLOCK_SIZE * 1.5,
                    h - BLOCK_SIZE * 8.0,
                    BLOCK_SIZE,
                    BLOCK_SIZE,
                ),
                active: true,
            })
            .collect();

        let question_blocks = QUESTION_BLOCKS
            .iter()
            .enumerate()
            .map(|(i, &(x, rows))| {
                let content = if i == 0 || rng.random_bool(0.5) {
                    BlockContent::Coin
                } else {
                    BlockContent::Mushroom
                };
                QuestionBlock {
                    rect: Rect::new(x, h - BLOCK_SIZE * rows, BLOCK_SIZE, BLOCK_SIZE),
                    active: true,
                    content,
                    bounce: 0.0,
                }
            })
            .collect();

        let flag_pole = FlagPole {
            rect: Rect::new(FLAG_X, ground_top(h) - FLAG_HEIGHT, FLAG_WIDTH, FLAG_HEIGHT),
            reached: false,
        };

        log::debug!(
            "Level built for height {h}: {} platforms, {} bricks",
            platforms.len(),
            BRICK_COUNT
        );

        Self {
            platforms,
            bricks,
            question_blocks,
            flag_pole,
        }
    }

    /// Move every piece of geometry down by `dy`
    pub fn shift(&mut self, dy: f32) {
        for platform in &mut self.platforms {
            platform.rect.pos.y += dy;
        }
        for brick in &mut self.bricks {
            brick.rect.pos.y += dy;
        }
        for block in &mut self.question_blocks {
            block.rect.pos.y += dy;
        }
        self.flag_pole.rect.pos.y += dy;
    }
}

/// The starting enemies, standing on the ground strip
pub fn enemy_roster(viewport_height: f32) -> Vec<Enemy> {
    ENEMY_SPAWNS
        .iter()
        .map(|&x| Enemy::rat(x, ground_top(viewport_height)))
        .collect()
}
