//! Star layers
//!
//! Stars scroll with the camera in normal flight and stream radially away
//! from the surface center while warping.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::renderer::Rgba;
use crate::tuning::LayerConfig;

/// Star colors: white, light yellow, light blue, peach
pub const STAR_PALETTE: [Rgba; 4] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 224.0 / 255.0, 1.0],
    [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0],
    [1.0, 218.0 / 255.0, 185.0 / 255.0, 1.0],
];

/// Twinkle clamp
pub const MIN_STAR_OPACITY: f32 = 0.2;
pub const MAX_STAR_OPACITY: f32 = 1.0;

/// Spread added on top of the layer base speed
pub const SPEED_JITTER: f32 = 0.5;

/// Stars closer than this to the warp center have no usable heading
pub const WARP_CENTER_EPSILON: f32 = 1e-3;

/// Depth band a star belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Near,
    Medium,
    Far,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Near => "near",
            LayerKind::Medium => "medium",
            LayerKind::Far => "far",
        }
    }
}

/// A single background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    pub color: Rgba,
    pub opacity: f32,
}

impl Star {
    /// Create a star somewhere on a surface of the given size
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, layer: &LayerConfig, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y),
            radius: rng.random::<f32>() * layer.max_radius,
            base_speed: layer.base_speed + rng.random::<f32>() * SPEED_JITTER,
            color: STAR_PALETTE[rng.random_range(0..STAR_PALETTE.len())],
            opacity: 0.5 + rng.random::<f32>() * 0.5,
        }
    }

    /// Normal flight: scroll with the camera, twinkle, wrap at the edges.
    ///
    /// A wrapped star keeps the edge it re-enters from but gets a fresh
    /// coordinate along that edge.
    pub fn drift<R: Rng + ?Sized>(&mut self, velocity: Vec2, twinkle: f32, size: Vec2, rng: &mut R) {
        self.pos.y += self.base_speed + velocity.y;
        self.pos.x += velocity.x;

        self.opacity += (rng.random::<f32>() - 0.5) * twinkle;
        self.opacity = self.opacity.clamp(MIN_STAR_OPACITY, MAX_STAR_OPACITY);

        if self.pos.y > size.y {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * size.x;
        }
        if self.pos.y < 0.0 {
            self.pos.y = size.y;
            self.pos.x = rng.random::<f32>() * size.x;
        }
        if self.pos.x > size.x {
            self.pos.x = 0.0;
            self.pos.y = rng.random::<f32>() * size.y;
        }
        if self.pos.x < 0.0 {
            self.pos.x = size.x;
            self.pos.y = rng.random::<f32>() * size.y;
        }
    }

    /// Warp: move straight away from `center`, respawning near it once off-surface
    pub fn warp<R: Rng + ?Sized>(
        &mut self,
        center: Vec2,
        warp_speed: f32,
        spawn_radius: f32,
        size: Vec2,
        rng: &mut R,
    ) {
        let mut offset = self.pos - center;
        if offset.length_squared() < WARP_CENTER_EPSILON * WARP_CENTER_EPSILON {
            offset = polar_to_cartesian(WARP_CENTER_EPSILON, rng.random::<f32>() * std::f32::consts::TAU);
        }

        let heading = offset / offset.length();
        self.pos = center + offset + heading * self.base_speed * warp_speed;

        if !self.is_inside(size) {
            let theta = rng.random::<f32>() * std::f32::consts::TAU;
            let r = rng.random::<f32>() * spawn_radius;
            self.pos = center + polar_to_cartesian(r, theta);
        }
    }

    /// True if the star lies within `[0, size]` on both axes
    pub fn is_inside(&self, size: Vec2) -> bool {
        self.pos.x >= 0.0 && self.pos.x <= size.x && self.pos.y >= 0.0 && self.pos.y <= size.y
    }
}

/// A fixed population of stars sharing one depth band
#[derive(Debug, Clone)]
pub struct StarLayer {
    pub kind: LayerKind,
    pub stars: Vec<Star>,
}

impl StarLayer {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, kind: LayerKind, config: &LayerConfig, size: Vec2) -> Self {
        let stars = (0..config.count)
            .map(|_| Star::spawn(rng, config, size))
            .collect();
        Self { kind, stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
