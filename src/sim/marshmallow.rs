//! A single roastable marshmallow

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::roast::{RoastState, roast_state};
use crate::consts::MARSHMALLOW_SIZE;

/// Shape used to decide whether the pointer is over a marshmallow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitShape {
    /// Axis-aligned square of side `MARSHMALLOW_SIZE`, centred on the position
    #[default]
    Square,
    /// Circle of radius `MARSHMALLOW_SIZE / 2`, centred on the position
    Circle,
}

/// A marshmallow on a stick. The roast state is never stored; it is always
/// derived from `roast_timer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Marshmallow {
    /// Sprite centre in logical pixels
    pub pos: Vec2,
    /// Edge length of the sprite / hit square
    pub size: f32,
    /// Seconds since the last reset
    pub roast_timer: f32,
}

impl Marshmallow {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: MARSHMALLOW_SIZE,
            roast_timer: 0.0,
        }
    }

    pub fn state(&self) -> RoastState {
        roast_state(self.roast_timer)
    }

    /// Roast for `dt` seconds. Negative deltas are ignored so the timer never
    /// runs backwards.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.roast_timer += dt;
        }
    }

    /// Back to a fresh, raw marshmallow
    pub fn reset(&mut self) {
        self.roast_timer = 0.0;
    }

    pub fn hit_test(&self, point: Vec2, shape: HitShape) -> bool {
        let half = self.size / 2.0;
        let d = point - self.pos;
        match shape {
            // Left/top edges inside, right/bottom edges outside
            HitShape::Square => d.x >= -half && d.x < half && d.y >= -half && d.y < half,
            HitShape::Circle => d.length_squared() <= half * half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_raw() {
        let m = Marshmallow::new(Vec2::new(200.0, 150.0));
        assert_eq!(m.roast_timer, 0.0);
        assert_eq!(m.state(), RoastState::Raw);
    }

    #[test]
    fn test_advance_and_reset() {
        let mut m = Marshmallow::new(Vec2::ZERO);
        m.advance(3.0);
        assert_eq!(m.state(), RoastState::Toasted);
        m.advance(-10.0);
        assert_eq!(m.roast_timer, 3.0);
        m.advance(4.0);
        assert_eq!(m.state(), RoastState::Burnt);

        m.reset();
        assert_eq!(m.roast_timer, 0.0);
        assert_eq!(m.state(), RoastState::Raw);

        // Resetting a fresh marshmallow is harmless
        m.reset();
        assert_eq!(m.state(), RoastState::Raw);
    }

    #[test]
    fn test_square_hit_test() {
        let m = Marshmallow::new(Vec2::new(200.0, 150.0));
        assert!(m.hit_test(Vec2::new(200.0, 150.0), HitShape::Square));
        assert!(m.hit_test(Vec2::new(180.0, 130.0), HitShape::Square));
        assert!(m.hit_test(Vec2::new(219.9, 169.9), HitShape::Square));
        assert!(!m.hit_test(Vec2::new(220.0, 150.0), HitShape::Square));
        assert!(!m.hit_test(Vec2::new(200.0, 170.0), HitShape::Square));
        assert!(!m.hit_test(Vec2::new(179.9, 150.0), HitShape::Square));
    }

    #[test]
    fn test_circle_hit_test() {
        let m = Marshmallow::new(Vec2::new(200.0, 150.0));
        assert!(m.hit_test(Vec2::new(200.0, 150.0), HitShape::Circle));
        assert!(m.hit_test(Vec2::new(220.0, 150.0), HitShape::Circle));
        // Square corner is outside the circle
        assert!(!m.hit_test(Vec2::new(218.0, 168.0), HitShape::Circle));
        assert!(m.hit_test(Vec2::new(218.0, 168.0), HitShape::Square));
    }
}
