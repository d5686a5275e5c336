//! Patrolling enemies and their contact with the player

use glam::Vec2;
use rand::Rng;

use super::camera::Camera;
use super::director::{Director, GameEvent};
use super::effects::Effects;
use super::entities::{DEBRIS_COLOR, Enemy, EnemyKind, Platform};
use super::geometry::{Bounds, collide};
use super::player::Player;
use crate::consts::*;
use crate::settings::Tuning;

const ENEMY_SIZE: f32 = 32.0;
const ENEMY_SPEED: f32 = 1.0;

impl Enemy {
    /// A rat walking left, standing on a surface whose top is at `ground_y`
    pub fn rat(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - ENEMY_SIZE),
            vel: Vec2::new(-ENEMY_SPEED, 0.0),
            size: Vec2::splat(ENEMY_SIZE),
            alive: true,
            kind: EnemyKind::Rat,
        }
    }
}

/// How a player/enemy overlap resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on the enemy from above
    Stomp,
    /// Player took the hit but kept the life (was big)
    Shrunk,
    /// Player loses a life
    Fatal,
    /// Invincible player walked through
    Ignored,
}

/// Stomp when falling and the player's pre-step bottom was at or above the
/// enemy's top plus `STOMP_TOLERANCE`
fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.vel.y > 0.0
        && player.pos.y + player.height - player.vel.y <= enemy.pos.y + STOMP_TOLERANCE
}

/// Move every live enemy and resolve player contact.
///
/// Returns true if the player lost a life. Once that happens the remaining
/// enemies still move but no longer touch the player this frame.
#[allow(clippy::too_many_arguments)]
pub fn update(
    enemies: &mut [Enemy],
    platforms: &[Platform],
    player: &mut Player,
    camera: &Camera,
    viewport_width: f32,
    director: &mut Director,
    effects: &mut Effects,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> bool {
    let (window_left, window_right) = camera.active_window(viewport_width, CULL_MARGIN);
    let mut life_lost = false;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.x += enemy.vel.x;

        if enemy.pos.x < window_left || enemy.pos.x > window_right {
            continue;
        }

        // Any platform overlap turns the enemy around
        for platform in platforms {
            if collide(&*enemy, platform) {
                enemy.vel.x = -enemy.vel.x;
            }
        }

        if life_lost || !collide(&*player, &*enemy) {
            continue;
        }
        match resolve_contact(enemy, player, director, effects, rng, tuning) {
            Contact::Fatal => life_lost = true,
            Contact::Stomp | Contact::Shrunk | Contact::Ignored => {}
        }
    }
    life_lost
}

/// Stomp or damage for an overlapping pair
pub fn resolve_contact(
    enemy: &mut Enemy,
    player: &mut Player,
    director: &mut Director,
    effects: &mut Effects,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> Contact {
    if is_stomp(player, enemy) {
        enemy.alive = false;
        player.vel.y = STOMP_BOUNCE_VELOCITY;
        director.award(tuning.score_stomp);
        director.board.kills += 1;
        effects.burst(rng, enemy.bounds().top_center(), DEBRIS_COLOR);
        director.emit(GameEvent::EnemyStomped);
        log::debug!("Stomped {:?} at x={}", enemy.kind, enemy.pos.x);
        return Contact::Stomp;
    }
    if player.is_invincible {
        return Contact::Ignored;
    }
    if player.is_big {
        player.shrink();
        director.grant_invincibility(player, tuning.damage_invincibility_ms);
        director.emit(GameEvent::PlayerHurt);
        log::debug!("Hit by {:?} while big, shrinking", enemy.kind);
        Contact::Shrunk
    } else {
        Contact::Fatal
    }
}
