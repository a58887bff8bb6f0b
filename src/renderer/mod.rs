//! Rendering
//!
//! The field paints through the immediate-mode [`Surface`] trait. Backends:
//! - [`Raster`]: software RGBA8 buffer (headless snapshots, tests)
//! - [`CommandRecorder`]: captures commands for inspection
//! - `CanvasSurface`: browser `CanvasRenderingContext2d` (wasm only)

use glam::Vec2;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod raster;
pub mod recorder;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use raster::{Pixel, Raster};
pub use recorder::{CommandRecorder, DrawCommand};

/// Straight-alpha color, channels in [0, 1]
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// A 2D immediate-mode drawing target
///
/// Every fill and stroke is multiplied by the current global alpha.
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;

    /// Reset every pixel to transparent black
    fn clear(&mut self);

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Disc shaded from `inner` at the center to `outer` at `radius`
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    fn set_global_alpha(&mut self, alpha: f32);
}

/// Format a color as a CSS `rgba()` string
pub fn css_rgba(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round(),
        (color[1] * 255.0).round(),
        (color[2] * 255.0).round(),
        color[3]
    )
}
