//! Software RGBA8 raster
//!
//! Coverage is approximated per pixel center with a one-pixel soft edge, so
//! sub-pixel stars still leave a faint mark.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::{Rgba, Surface};

/// One RGBA8 pixel (straight alpha)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Pixel-addressable drawing target
pub struct Raster {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
    global_alpha: f32,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Pixel::TRANSPARENT; (width as usize) * (height as usize)],
            width,
            height,
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate to a new size; contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Pixel::TRANSPARENT; (width as usize) * (height as usize)];
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the raster as a PNG
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_png(&self, path: &std::path::Path) -> Result<(), crate::FieldError> {
        image::save_buffer(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        log::info!("Wrote {}x{} snapshot to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Source-over blend `color` at `coverage` into one pixel
    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f32) {
        let alpha = (color[3] * coverage * self.global_alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let dst = &mut self.pixels[y * self.width as usize + x];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);

        let channel = |src: f32, dst: u8| -> u8 {
            let dst = dst as f32 / 255.0;
            let out = (src * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
            (out.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        *dst = Pixel {
            r: channel(color[0], dst.r),
            g: channel(color[1], dst.g),
            b: channel(color[2], dst.b),
            a: (out_a * 255.0).round() as u8,
        };
    }

    /// Clipped pixel range covering `[min, max]`, or None if off-surface
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(usize, usize, usize, usize)> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Visit every pixel center in the clipped box
    fn shade(&mut self, min: Vec2, max: Vec2, mut f: impl FnMut(Vec2) -> Option<(Rgba, f32)>) {
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some((color, coverage)) = f(p) {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

impl Surface for Raster {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Rgba) {
        let min = origin.min(origin + extent);
        let max = origin.max(origin + extent);
        self.shade(min, max, |p| {
            (p.cmpge(min).all() && p.cmplt(max).all()).then_some((color, 1.0))
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let reach = Vec2::splat(radius + 1.0);
        self.shade(center - reach, center + reach, |p| {
            let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius);
        self.shade(center - reach, center + reach, |p| {
            let d = p.distance(center);
            (d <= radius).then(|| (lerp_color(inner, outer, d / radius), 1.0))
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let half = width / 2.0;
        let reach = Vec2::splat(half + 1.0);
        self.shade(from.min(to) - reach, from.max(to) + reach, |p| {
            let coverage = (half + 0.5 - segment_distance(p, from, to)).clamp(0.0, 1.0);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }
}
