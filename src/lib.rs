//! Starfield - animated parallax background with a warp effect
//!
//! Core modules:
//! - `sim`: Deterministic particle simulation (stars, nebulae, shooting stars)
//! - `renderer`: Immediate-mode drawing surfaces and the scene painter
//! - `driver`: Fixed-timestep frame loop
//! - `platform`: Host input adapters
//! - `tuning`: Data-driven field parameters
//! - `settings`: User preferences

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use error::FieldError;
pub use settings::{QualityPreset, Settings};
pub use sim::ParticleField;
pub use tuning::FieldConfig;

use glam::Vec2;

/// Frame loop constants
pub mod consts {
    /// Fixed simulation step (one animation frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest wall-clock gap credited to a single animation frame
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame deltas this close to `FRAME_DT` count as exactly one step
    pub const FRAME_DT_SNAP: f32 = FRAME_DT * 0.25;
    /// Maximum updates per animation frame (covers `MAX_FRAME_DT`)
    pub const MAX_SUBSTEPS: u32 = 6;
    /// Frames averaged for the FPS readout
    pub const FPS_WINDOW: usize = 60;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert_eq!(polar_to_cartesian(0.0, 1.3), Vec2::ZERO);
    }
}
