//! Shooting stars: a small recycled pool of fading streaks

use glam::Vec2;
use rand::Rng;

/// Stroke width of a shooting star trail
pub const TRAIL_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    /// Head of the streak
    pub pos: Vec2,
    /// Trail extent along each axis (the trail runs up and to the right)
    pub len: f32,
    /// Pixels per frame along each axis
    pub speed: f32,
    pub opacity: f32,
}

impl ShootingStar {
    /// Fresh streak in the upper half of the surface
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y / 2.0),
            len: 10.0 + rng.random::<f32>() * 80.0,
            speed: 5.0 + rng.random::<f32>() * 10.0,
            opacity: 1.0,
        }
    }

    /// Tail end of the trail
    pub fn trail_end(&self) -> Vec2 {
        self.pos + Vec2::new(self.len, -self.len)
    }

    /// Move down-left and fade. Returns true once fully faded.
    pub fn advance(&mut self, fade: f32) -> bool {
        self.pos += Vec2::new(-self.speed, self.speed);
        self.opacity -= fade;
        self.opacity <= 0.0
    }
}
