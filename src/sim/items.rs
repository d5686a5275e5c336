//! Power-up items: spawning, falling, pickup and despawn

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::director::{Director, GameEvent};
use super::entities::{Item, ItemKind, Platform};
use super::geometry::{Bounds, Rect, collide, overlaps};
use super::physics::{integrate, lands_on};
use super::player::Player;
use crate::consts::*;
use crate::settings::Tuning;

/// Horizontal drift of a freshly spawned item
const ITEM_DRIFT: f32 = 2.0;
const ITEM_SIZE: f32 = 32.0;

/// Owner of the live item container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemManager {
    pub items: Vec<Item>,
}

impl ItemManager {
    /// Drop a new item into the world at `pos` (top-left)
    pub fn spawn(&mut self, kind: ItemKind, pos: Vec2) {
        self.items.push(Item {
            kind,
            pos,
            vel: Vec2::new(ITEM_DRIFT, 0.0),
            size: Vec2::splat(ITEM_SIZE),
        });
    }

    /// Advance every item one frame, apply pickups and drop out-of-bounds
    /// items. Survivors keep their relative order.
    pub fn update(
        &mut self,
        platforms: &[Platform],
        player: &mut Player,
        director: &mut Director,
        camera: &Camera,
        viewport_height: f32,
        tuning: &Tuning,
    ) {
        let mut survivors = Vec::with_capacity(self.items.len());
        for mut item in std::mem::take(&mut self.items) {
            let prev = item.bounds();
            integrate(&mut item.pos, &mut item.vel, tuning.gravity);
            settle_on_platforms(&mut item, &prev, platforms);

            if collide(&*player, &item) {
                apply_pickup(item.kind, player, director, tuning);
                continue;
            }
            if item.pos.y > viewport_height || item.pos.x < camera.x - ITEM_DESPAWN_MARGIN {
                log::trace!("{:?} left the level at {:?}", item.kind, item.pos);
                continue;
            }
            survivors.push(item);
        }
        self.items = survivors;
    }

    pub fn shift(&mut self, dy: f32) {
        for item in &mut self.items {
            item.pos.y += dy;
        }
    }
}

/// Items only ever land; they pass through platform sides and bottoms
fn settle_on_platforms(item: &mut Item, prev: &Rect, platforms: &[Platform]) {
    for platform in platforms {
        if overlaps(&item.bounds(), &platform.rect) && lands_on(prev, item.vel.y, &platform.rect) {
            item.pos.y = platform.rect.top() - item.size.y;
            item.vel.y = 0.0;
        }
    }
}

/// Grant a collected item's effect
pub fn apply_pickup(kind: ItemKind, player: &mut Player, director: &mut Director, tuning: &Tuning) {
    match kind {
        ItemKind::Mushroom => player.grow(),
        ItemKind::Star => director.grant_invincibility(player, tuning.star_invincibility_ms),
    }
    director.award(tuning.score_power_up);
    director.emit(GameEvent::PowerUp { kind });
    log::debug!("Picked up {kind:?}");
}
