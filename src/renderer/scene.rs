//! Paints a particle field back to front: nebulae, stars, shooting stars

use glam::Vec2;

use super::{BLACK, Surface};
use crate::sim::shooting_star::TRAIL_WIDTH;
use crate::sim::{Nebula, ParticleField, ShootingStar, Star};

pub fn draw_field<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    let size = surface.size();
    surface.clear();
    surface.fill_rect(Vec2::ZERO, size, BLACK);

    for nebula in field.nebulae() {
        draw_nebula(nebula, surface);
    }
    for star in field.stars() {
        draw_star(star, surface);
    }
    if !field.is_warping() {
        for shooting_star in field.shooting_stars() {
            draw_shooting_star(shooting_star, surface);
        }
    }
}

fn draw_nebula<S: Surface + ?Sized>(nebula: &Nebula, surface: &mut S) {
    surface.set_global_alpha(nebula.opacity);
    surface.fill_radial_gradient(nebula.pos, nebula.radius, nebula.inner, nebula.outer);
    surface.set_global_alpha(1.0);
}

fn draw_star<S: Surface + ?Sized>(star: &Star, surface: &mut S) {
    surface.set_global_alpha(star.opacity);
    surface.fill_circle(star.pos, star.radius, star.color);
    surface.set_global_alpha(1.0);
}

fn draw_shooting_star<S: Surface + ?Sized>(shooting_star: &ShootingStar, surface: &mut S) {
    let color = [1.0, 1.0, 1.0, shooting_star.opacity];
    surface.stroke_line(shooting_star.pos, shooting_star.trail_end(), TRAIL_WIDTH, color);
}
