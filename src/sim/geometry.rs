//! Axis-aligned bounding boxes
//!
//! Everything in the level is a screen-aligned rectangle, so a single
//! half-open overlap test drives every pairwise interaction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (y grows downward, origin at top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Midpoint of the top edge (spawn point for block effects)
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

/// Anything with a bounding box
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// True iff the two boxes intersect on both axes.
///
/// Touching edges do not count: a player standing exactly on a platform top
/// does not overlap it.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Convenience wrapper over [`overlaps`] for entity pairs
#[inline]
pub fn collide(a: &impl Bounds, b: &impl Bounds) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}
