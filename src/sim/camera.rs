//! Horizontal follow camera

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::consts::LEVEL_WIDTH;

/// World-space offset of the viewport's top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    /// Always 0, the level does not scroll vertically
    pub y: f32,
}

impl Camera {
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    /// Keep the player a third of the way in from the left edge, without
    /// showing anything outside `[0, LEVEL_WIDTH]`
    pub fn follow(&mut self, player: &Player, viewport_width: f32) {
        let target = player.pos.x - viewport_width / 3.0;
        // Viewport wider than the level: pin to the origin
        let max_x = (LEVEL_WIDTH - viewport_width).max(0.0);
        self.x = target.clamp(0.0, max_x);
        self.y = 0.0;
    }

    /// Horizontal range enemies keep simulating in
    pub fn active_window(&self, viewport_width: f32, margin: f32) -> (f32, f32) {
        (self.x - margin, self.x + viewport_width + margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use proptest::prelude::*;

    fn player_at(x: f32) -> Player {
        let mut player = Player::new(&Tuning::default());
        player.pos.x = x;
        player
    }

    #[test]
    fn test_follows_third_of_viewport() {
        let mut camera = Camera::default();
        camera.follow(&player_at(1000.0), 900.0);
        assert_eq!(camera.x, 700.0);
    }

    #[test]
    fn test_clamps_at_level_start_and_end() {
        let mut camera = Camera::default();
        camera.follow(&player_at(50.0), 900.0);
        assert_eq!(camera.x, 0.0);
        camera.follow(&player_at(7400.0), 900.0);
        assert_eq!(camera.x, LEVEL_WIDTH - 900.0);
    }

    #[test]
    fn test_viewport_wider_than_level() {
        let mut camera = Camera::default();
        camera.follow(&player_at(5000.0), 9000.0);
        assert_eq!(camera.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_camera_stays_in_level(x in -1000.0f32..10_000.0, width in 320.0f32..3840.0) {
            let mut camera = Camera::default();
            camera.follow(&player_at(x), width);
            prop_assert!(camera.x >= 0.0);
            prop_assert!(camera.x <= (LEVEL_WIDTH - width).max(0.0));
            prop_assert_eq!(camera.y, 0.0);
        }
    }
}
