//! The player character and its per-frame controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Platform;
use super::geometry::{Bounds, Rect, overlaps};
use super::physics::{integrate, lands_on, strikes_from_below};
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::Tuning;

/// Ticks between animation frames
const ANIM_TICKS: u8 = 8;
/// Walk cycle length
const ANIM_FRAMES: u8 = 3;

/// The panda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Position before this frame's integration step
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    /// 32 normally, 48 while big
    pub height: f32,
    pub speed: f32,
    pub jump_power: f32,
    pub on_ground: bool,
    pub is_big: bool,
    pub is_invincible: bool,
    /// Bumped on every invincibility grant; scheduled expiries carry the
    /// value they were issued for
    pub invincibility_grant: u32,
    /// +1 facing right, -1 facing left
    pub facing: i8,
    pub anim_frame: u8,
    pub anim_counter: u8,
    /// Lifetime airborne-to-grounded transitions
    pub landing_count: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let start = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        Self {
            pos: start,
            prev_pos: start,
            vel: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: tuning.player_speed,
            jump_power: tuning.jump_power,
            on_ground: false,
            is_big: false,
            is_invincible: false,
            invincibility_grant: 0,
            facing: 1,
            anim_frame: 0,
            anim_counter: 0,
            landing_count: 0,
        }
    }

    /// Put the player back at the level start after losing a life.
    ///
    /// Size and landing count carry over; any running invincibility window
    /// is revoked so its pending expiry becomes stale.
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.prev_pos = self.pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.revoke_invincibility();
    }

    /// Mushroom pickup. Feet stay where they were.
    pub fn grow(&mut self) {
        if !self.is_big {
            self.is_big = true;
            self.pos.y -= PLAYER_BIG_HEIGHT - PLAYER_HEIGHT;
            self.height = PLAYER_BIG_HEIGHT;
        }
    }

    /// Back to normal size after taking a hit while big
    pub fn shrink(&mut self) {
        if self.is_big {
            self.is_big = false;
            self.pos.y += PLAYER_BIG_HEIGHT - PLAYER_HEIGHT;
            self.height = PLAYER_HEIGHT;
        }
    }

    /// Start a new invincibility window, returning its grant id
    pub fn grant_invincibility(&mut self) -> u32 {
        self.invincibility_grant = self.invincibility_grant.wrapping_add(1);
        self.is_invincible = true;
        self.invincibility_grant
    }

    /// End the window issued as `grant`; ignored if a newer one superseded it
    pub fn expire_invincibility(&mut self, grant: u32) -> bool {
        if self.invincibility_grant == grant && self.is_invincible {
            self.is_invincible = false;
            true
        } else {
            false
        }
    }

    fn revoke_invincibility(&mut self) {
        self.invincibility_grant = self.invincibility_grant.wrapping_add(1);
        self.is_invincible = false;
    }

    /// Bounding box before this frame's integration step
    pub fn prev_bounds(&self) -> Rect {
        Rect::new(self.prev_pos.x, self.prev_pos.y, self.width, self.height)
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Movement, jumping, gravity and platform resolution for one frame.
///
/// Returns true on the frame the player touches down after being airborne;
/// `landing_count` has already been incremented when it does.
pub fn update(player: &mut Player, input: &TickInput, tuning: &Tuning, platforms: &[Platform]) -> bool {
    player.anim_counter += 1;
    if player.anim_counter > ANIM_TICKS {
        player.anim_counter = 0;
        player.anim_frame = (player.anim_frame + 1) % ANIM_FRAMES;
    }

    if input.left {
        player.vel.x = -player.speed;
        player.facing = -1;
    } else if input.right {
        player.vel.x = player.speed;
        player.facing = 1;
    } else {
        player.vel.x *= tuning.friction;
    }

    // Held jump re-triggers as soon as the player is grounded again
    if input.jump && player.on_ground {
        player.vel.y = -player.jump_power;
        player.on_ground = false;
    }

    player.prev_pos = player.pos;
    integrate(&mut player.pos, &mut player.vel, tuning.gravity);

    let was_on_ground = player.on_ground;
    player.on_ground = false;
    resolve_platforms(player, platforms);

    if player.on_ground && !was_on_ground {
        player.landing_count += 1;
        return true;
    }
    false
}

/// Vertical-only resolution, one platform at a time in container order
fn resolve_platforms(player: &mut Player, platforms: &[Platform]) {
    let prev = player.prev_bounds();
    for platform in platforms {
        if !overlaps(&player.bounds(), &platform.rect) {
            continue;
        }
        if lands_on(&prev, player.vel.y, &platform.rect) {
            player.pos.y = platform.rect.top() - player.height;
            player.vel.y = 0.0;
            player.on_ground = true;
        } else if strikes_from_below(&prev, player.vel.y, &platform.rect) {
            player.pos.y = platform.rect.bottom();
            player.vel.y = 0.0;
        }
    }
}

/// Dropped below the bottom of the viewport (into a pit)
pub fn fell_out(player: &Player, viewport_height: f32) -> bool {
    player.pos.y > viewport_height
}

/// No walking off the left edge of the level
pub fn clamp_to_level(player: &mut Player) {
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
    }
}
