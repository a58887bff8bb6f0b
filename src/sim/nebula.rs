//! Nebula blobs: large soft gradient discs drifting behind the stars

use glam::Vec2;
use rand::Rng;

use crate::renderer::Rgba;

/// Radius range for a freshly spawned nebula
pub const NEBULA_MIN_RADIUS: f32 = 200.0;
pub const NEBULA_MAX_RADIUS: f32 = 500.0;

/// Per-axis drift magnitude
pub const NEBULA_MAX_DRIFT: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    /// Gradient color at the center (partially opaque)
    pub inner: Rgba,
    /// Gradient color at the rim (same hue, fully transparent)
    pub outer: Rgba,
    pub drift: Vec2,
    pub opacity: f32,
}

impl Nebula {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y);
        let radius = NEBULA_MIN_RADIUS + rng.random::<f32>() * (NEBULA_MAX_RADIUS - NEBULA_MIN_RADIUS);

        // Purple-blue hues
        let r = rng.random::<f32>() * 100.0 / 255.0;
        let g = rng.random::<f32>() * 50.0 / 255.0;
        let b = (155.0 + rng.random::<f32>() * 100.0) / 255.0;
        let alpha = 0.05 + rng.random::<f32>() * 0.1;

        let drift = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * NEBULA_MAX_DRIFT,
            (rng.random::<f32>() - 0.5) * 2.0 * NEBULA_MAX_DRIFT,
        );

        Self {
            pos,
            radius,
            inner: [r, g, b, alpha],
            outer: [r, g, b, 0.0],
            drift,
            opacity: 1.0,
        }
    }

    /// Normal flight: fade in, drift against the camera, wrap fully off-surface
    pub fn drift(&mut self, camera: Vec2, parallax: f32, fade_in: f32, size: Vec2) {
        self.opacity += (1.0 - self.opacity) * fade_in;
        self.pos += self.drift - camera * parallax;

        let r = self.radius;
        if self.pos.x + r < 0.0 {
            self.pos.x = size.x + r;
        }
        if self.pos.x - r > size.x {
            self.pos.x = -r;
        }
        if self.pos.y + r < 0.0 {
            self.pos.y = size.y + r;
        }
        if self.pos.y - r > size.y {
            self.pos.y = -r;
        }
    }

    /// Warp: hold position and fade out
    pub fn fade(&mut self, rate: f32) {
        self.opacity -= self.opacity * rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    fn nebula_at(x: f32, y: f32) -> Nebula {
        Nebula {
            pos: Vec2::new(x, y),
            radius: 250.0,
            inner: [0.2, 0.1, 0.8, 0.1],
            outer: [0.2, 0.1, 0.8, 0.0],
            drift: Vec2::new(0.01, -0.02),
            opacity: 0.5,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let n = Nebula::spawn(&mut rng, SIZE);
            assert!((NEBULA_MIN_RADIUS..=NEBULA_MAX_RADIUS).contains(&n.radius));
            assert!(n.drift.x.abs() <= NEBULA_MAX_DRIFT && n.drift.y.abs() <= NEBULA_MAX_DRIFT);
            assert_eq!(&n.inner[..3], &n.outer[..3]);
            assert!(n.inner[3] >= 0.05 && n.inner[3] < 0.15 + 1e-6);
            assert_eq!(n.outer[3], 0.0);
            assert!(n.inner[2] >= 155.0 / 255.0);
            assert_eq!(n.opacity, 1.0);
        }
    }

    #[test]
    fn test_drift_against_camera() {
        let mut n = nebula_at(400.0, 300.0);
        n.drift(Vec2::new(2.0, 1.0), 0.1, 0.02, SIZE);
        assert!((n.pos.x - (400.0 + 0.01 - 0.2)).abs() < 1e-4);
        assert!((n.pos.y - (300.0 - 0.02 - 0.1)).abs() < 1e-4);
        assert!((n.opacity - 0.51).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_with_radius_offset() {
        let mut n = nebula_at(-249.995, 300.0);
        n.drift = Vec2::new(-0.01, 0.0);
        n.drift(Vec2::ZERO, 0.1, 0.02, SIZE);
        assert_eq!(n.pos.x, 800.0 + 250.0);

        let mut n = nebula_at(400.0, 849.99);
        n.drift = Vec2::new(0.0, 0.02);
        n.drift(Vec2::ZERO, 0.1, 0.02, SIZE);
        assert_eq!(n.pos.y, -250.0);
    }

    #[test]
    fn test_wraps_right_and_top_edges() {
        let mut n = nebula_at(1049.995, 300.0);
        n.drift = Vec2::new(0.01, 0.0);
        n.drift(Vec2::ZERO, 0.1, 0.02, SIZE);
        assert_eq!(n.pos.x, -250.0);

        let mut n = nebula_at(400.0, -249.99);
        n.drift = Vec2::new(0.0, -0.02);
        n.drift(Vec2::ZERO, 0.1, 0.02, SIZE);
        assert_eq!(n.pos.y, 600.0 + 250.0);
    }

    #[test]
    fn test_fade_decays() {
        let mut n = nebula_at(400.0, 300.0);
        n.opacity = 1.0;
        n.fade(0.05);
        assert!((n.opacity - 0.95).abs() < 1e-6);
        for _ in 0..200 {
            n.fade(0.05);
        }
        assert!(n.opacity >= 0.0 && n.opacity < 0.001);
        assert_eq!(n.pos, Vec2::new(400.0, 300.0));
    }
}
