//! Vertical follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CANVAS_HEIGHT;
use crate::tuning::Tuning;

/// World-to-screen offset along y
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    /// Where the camera wants to be for a player at `player_y`
    pub fn target_for(player_y: f32, tuning: &Tuning) -> f32 {
        player_y - CANVAS_HEIGHT * tuning.camera_lead
    }

    /// Ease toward the player (exponential smoothing, never a snap)
    pub fn follow(&mut self, player_y: f32, tuning: &Tuning) {
        let target = Self::target_for(player_y, tuning);
        self.y += (target - self.y) * tuning.camera_damping;
    }

    /// World y of the bottom edge of the visible window
    pub fn bottom(&self) -> f32 {
        self.y + CANVAS_HEIGHT
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x, world.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_closes_ten_percent_of_the_gap() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();

        // Target: 500 - 420 = 80
        camera.follow(500.0, &tuning);
        assert!((camera.y - 8.0).abs() < 1e-4);
        camera.follow(500.0, &tuning);
        assert!((camera.y - 15.2).abs() < 1e-4);
    }

    #[test]
    fn test_follow_converges_without_overshoot() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        let target = Camera::target_for(-1000.0, &tuning);

        for _ in 0..500 {
            let before = camera.y;
            camera.follow(-1000.0, &tuning);
            assert!(camera.y <= before);
            assert!(camera.y >= target);
        }
        assert!((camera.y - target).abs() < 0.01);
    }

    #[test]
    fn test_world_to_screen_subtracts_offset() {
        let camera = Camera { y: -250.0 };
        assert_eq!(
            camera.world_to_screen(Vec2::new(10.0, -200.0)),
            Vec2::new(10.0, 50.0)
        );
        assert_eq!(camera.bottom(), 350.0);
    }
}
