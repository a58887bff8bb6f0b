//! The particle field
//!
//! Owns the star layers, nebulae and shooting stars, advances them one frame
//! per `update()`, and paints them through a [`Surface`] in `draw()`.
//! Drawing never mutates state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::{Direction, FieldInput};
use super::nebula::Nebula;
use super::shooting_star::ShootingStar;
use super::star::{Star, StarLayer};
use crate::error::{FieldError, check_surface};
use crate::renderer::{Surface, scene};
use crate::tuning::FieldConfig;

pub struct ParticleField {
    config: FieldConfig,
    seed: u64,
    rng: Pcg32,
    size: Vec2,
    /// Host-written input, read at the start of each `update()`
    pub input: FieldInput,
    /// Camera drift (dx, dy)
    velocity: Vec2,
    /// Warp mode latched by the last `update()`
    warping: bool,
    layers: Vec<StarLayer>,
    nebulae: Vec<Nebula>,
    shooting_stars: Vec<ShootingStar>,
    frame: u64,
}

impl ParticleField {
    /// Populate a field over a `width` x `height` surface
    pub fn new(config: FieldConfig, width: f32, height: f32, seed: u64) -> Result<Self, FieldError> {
        let (width, height) = check_surface(width, height)?;
        config.validate()?;

        let size = Vec2::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);

        let layers = config
            .layers()
            .iter()
            .map(|(kind, layer)| StarLayer::spawn(&mut rng, *kind, layer, size))
            .collect();
        let nebulae = (0..config.nebula_count)
            .map(|_| Nebula::spawn(&mut rng, size))
            .collect();
        let shooting_stars = (0..config.shooting_star_count)
            .map(|_| ShootingStar::spawn(&mut rng, size))
            .collect();

        log::info!(
            "Particle field {}x{} (seed {}): {} stars, {} nebulae, {} shooting stars",
            width,
            height,
            seed,
            config.star_count(),
            config.nebula_count,
            config.shooting_star_count
        );

        Ok(Self {
            config,
            seed,
            rng,
            size,
            input: FieldInput::default(),
            velocity: Vec2::ZERO,
            warping: false,
            layers,
            nebulae,
            shooting_stars,
            frame: 0,
        })
    }

    /// Advance every entity by one frame
    pub fn update(&mut self) {
        if self.input.warp != self.warping {
            log::debug!(
                "Warp {} at frame {}",
                if self.input.warp { "engaged" } else { "released" },
                self.frame
            );
            self.warping = self.input.warp;
        }

        self.steer();

        let warping = self.warping;
        let Self {
            config,
            rng,
            size,
            velocity,
            layers,
            nebulae,
            shooting_stars,
            ..
        } = self;
        let size = *size;

        if warping {
            let center = size / 2.0;
            for nebula in nebulae.iter_mut() {
                nebula.fade(config.nebula_fade_out);
            }
            for star in layers.iter_mut().flat_map(|l| l.stars.iter_mut()) {
                star.warp(center, config.warp_speed, config.warp_spawn_radius, size, rng);
            }
        } else {
            for nebula in nebulae.iter_mut() {
                nebula.drift(*velocity, config.nebula_parallax, config.nebula_fade_in, size);
            }
            for star in layers.iter_mut().flat_map(|l| l.stars.iter_mut()) {
                star.drift(*velocity, config.twinkle, size, rng);
            }
            for shooting_star in shooting_stars.iter_mut() {
                if shooting_star.advance(config.shooting_star_fade) {
                    *shooting_star = ShootingStar::spawn(rng, size);
                }
            }
        }

        self.frame += 1;
    }

    /// Accelerate along held directions, then apply friction to both axes
    fn steer(&mut self) {
        let accel = self.config.acceleration;
        let max = self.config.max_speed;
        let v = &mut self.velocity;

        if self.input.right {
            v.x = (v.x + accel).min(max);
        }
        if self.input.left {
            v.x = (v.x - accel).max(-max);
        }
        if self.input.down {
            v.y = (v.y + accel).min(max);
        }
        if self.input.up {
            v.y = (v.y - accel).max(-max);
        }

        *v *= self.config.friction;
    }

    /// Paint the current state. Calling this twice without an `update()`
    /// issues identical commands.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        scene::draw_field(self, surface);
    }

    /// Change the surface bounds. Entities keep their positions and drift
    /// back into range as they wrap.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), FieldError> {
        let (width, height) = check_surface(width, height)?;
        self.size = Vec2::new(width, height);
        log::info!("Particle field resized to {}x{}", width, height);
        Ok(())
    }

    pub fn set_key(&mut self, direction: Direction, held: bool) {
        self.input.set(direction, held);
    }

    pub fn set_warping(&mut self, warping: bool) {
        self.input.warp = warping;
    }

    /// Warp mode as of the last update
    pub fn is_warping(&self) -> bool {
        self.warping
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Warp origin
    pub fn center(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames advanced since construction
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    /// All stars, layer by layer
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.layers.iter().flat_map(|l| l.stars.iter())
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.nebulae
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }
}
