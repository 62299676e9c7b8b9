/*
 * Obstacle Module
 *
 * Static circular obstacles. They are created once when the world is set up,
 * survive population resets, and are only ever read by obstacle avoidance
 * and wall-following.
 */

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SteeringError};
use crate::math::circle_contains;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    position: Vec2,
    radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 || !position.is_finite() {
            return Err(SteeringError::InvalidObstacle { radius });
        }
        Ok(Self { position, radius })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    // True when `point` lies inside the obstacle grown by `margin`
    pub fn is_within(&self, point: Vec2, margin: f32) -> bool {
        circle_contains(self.position, self.radius + margin, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_radius() {
        let err = Obstacle::new(Vec2::ZERO, -1.0).unwrap_err();
        assert_eq!(err, SteeringError::InvalidObstacle { radius: -1.0 });
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Obstacle::new(Vec2::ZERO, f32::NAN).is_err());
        assert!(Obstacle::new(Vec2::new(f32::INFINITY, 0.0), 5.0).is_err());
    }

    #[test]
    fn margin_extends_trigger_zone() {
        let obstacle = Obstacle::new(Vec2::new(100.0, 100.0), 20.0).unwrap();
        assert!(!obstacle.is_within(Vec2::new(130.0, 100.0), 0.0));
        assert!(obstacle.is_within(Vec2::new(130.0, 100.0), 15.0));
        // The grown edge itself does not trigger
        assert!(!obstacle.is_within(Vec2::new(130.0, 100.0), 10.0));
    }
}
