//! Per-frame integration and contact classification
//!
//! Velocities are in units per frame. Integration is semi-implicit: gravity
//! is applied to the velocity first, then the velocity is added to the
//! position. No bounds checking happens here.

use glam::Vec2;

use super::geometry::Rect;

/// Apply gravity, then move by the updated velocity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, gravity: f32) {
    vel.y += gravity;
    *pos += *vel;
}

/// Falling onto `surface` from above.
///
/// `prev` is the body's box before this frame's integration step.
#[inline]
pub fn lands_on(prev: &Rect, vel_y: f32, surface: &Rect) -> bool {
    vel_y > 0.0 && prev.bottom() <= surface.top()
}

/// Rising into `surface` from below (pre-step top at or under its bottom)
#[inline]
pub fn strikes_from_below(prev: &Rect, vel_y: f32, surface: &Rect) -> bool {
    vel_y < 0.0 && prev.top() >= surface.bottom()
}
