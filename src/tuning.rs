//! Data-driven field parameters
//!
//! Every value has a default matching the stock starfield look, so a partial
//! JSON file only needs the keys it changes.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldError;
use crate::sim::LayerKind;

/// Population and motion parameters for one star layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Number of stars in the layer
    pub count: usize,
    /// Minimum per-star fall speed (pixels/frame); each star adds up to `SPEED_JITTER`
    pub base_speed: f32,
    /// Upper bound for star radius at creation
    pub max_radius: f32,
}

impl LayerConfig {
    pub const NEAR: LayerConfig = LayerConfig::new(100, 0.7, 1.5);
    pub const MEDIUM: LayerConfig = LayerConfig::new(200, 0.4, 1.0);
    pub const FAR: LayerConfig = LayerConfig::new(400, 0.2, 0.5);

    pub const fn new(count: usize, base_speed: f32, max_radius: f32) -> Self {
        Self {
            count,
            base_speed,
            max_radius,
        }
    }
}

/// Layer keys given in a tuning file; missing keys keep the layer's stock value
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerOverride {
    count: Option<usize>,
    base_speed: Option<f32>,
    max_radius: Option<f32>,
}

impl LayerOverride {
    fn over(self, base: LayerConfig) -> LayerConfig {
        LayerConfig {
            count: self.count.unwrap_or(base.count),
            base_speed: self.base_speed.unwrap_or(base.base_speed),
            max_radius: self.max_radius.unwrap_or(base.max_radius),
        }
    }
}

fn near_layer<'de, D: Deserializer<'de>>(d: D) -> Result<LayerConfig, D::Error> {
    Ok(LayerOverride::deserialize(d)?.over(LayerConfig::NEAR))
}

fn medium_layer<'de, D: Deserializer<'de>>(d: D) -> Result<LayerConfig, D::Error> {
    Ok(LayerOverride::deserialize(d)?.over(LayerConfig::MEDIUM))
}

fn far_layer<'de, D: Deserializer<'de>>(d: D) -> Result<LayerConfig, D::Error> {
    Ok(LayerOverride::deserialize(d)?.over(LayerConfig::FAR))
}

/// Tunable parameters for a particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    #[serde(deserialize_with = "near_layer")]
    pub near: LayerConfig,
    #[serde(deserialize_with = "medium_layer")]
    pub medium: LayerConfig,
    #[serde(deserialize_with = "far_layer")]
    pub far: LayerConfig,

    /// Nebula pool size
    pub nebula_count: usize,
    /// Shooting star pool size
    pub shooting_star_count: usize,

    // === Camera drift ===
    /// Velocity change per frame while a direction key is held
    pub acceleration: f32,
    /// Multiplicative decay applied to velocity every frame
    pub friction: f32,
    /// Velocity clamp (per axis)
    pub max_speed: f32,

    // === Warp ===
    /// Multiplier on star base speed while warping
    pub warp_speed: f32,
    /// Stars leaving the surface during warp respawn within this radius of the center
    pub warp_spawn_radius: f32,

    // === Nebulae ===
    /// Fraction of camera velocity nebulae drift against
    pub nebula_parallax: f32,
    /// Per-frame approach rate toward full opacity
    pub nebula_fade_in: f32,
    /// Per-frame decay rate while warping
    pub nebula_fade_out: f32,

    // === Stars ===
    /// Width of the per-frame opacity random walk
    pub twinkle: f32,

    // === Shooting stars ===
    /// Opacity lost per frame
    pub shooting_star_fade: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            near: LayerConfig::NEAR,
            medium: LayerConfig::MEDIUM,
            far: LayerConfig::FAR,

            nebula_count: 7,
            shooting_star_count: 2,

            acceleration: 0.2,
            friction: 0.98,
            max_speed: 5.0,

            warp_speed: 10.0,
            warp_spawn_radius: 20.0,

            nebula_parallax: 0.1,
            nebula_fade_in: 0.02,
            nebula_fade_out: 0.05,

            twinkle: 0.1,

            shooting_star_fade: 0.02,
        }
    }
}

impl FieldConfig {
    /// Layer parameters in construction order (near, medium, far)
    pub fn layers(&self) -> [(LayerKind, LayerConfig); 3] {
        [
            (LayerKind::Near, self.near),
            (LayerKind::Medium, self.medium),
            (LayerKind::Far, self.far),
        ]
    }

    pub fn layer(&self, kind: LayerKind) -> &LayerConfig {
        match kind {
            LayerKind::Near => &self.near,
            LayerKind::Medium => &self.medium,
            LayerKind::Far => &self.far,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut LayerConfig {
        match kind {
            LayerKind::Near => &mut self.near,
            LayerKind::Medium => &mut self.medium,
            LayerKind::Far => &mut self.far,
        }
    }

    /// Total number of stars across all layers
    pub fn star_count(&self) -> usize {
        self.near.count + self.medium.count + self.far.count
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<(), FieldError> {
        for (kind, layer) in self.layers() {
            if !layer.base_speed.is_finite() || layer.base_speed < 0.0 {
                return Err(invalid(format!("{} layer base_speed must be >= 0", kind.as_str())));
            }
            if !layer.max_radius.is_finite() || layer.max_radius < 0.0 {
                return Err(invalid(format!("{} layer max_radius must be >= 0", kind.as_str())));
            }
        }

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction must be in (0, 1]"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(invalid("max_speed must be > 0"));
        }
        if !(self.acceleration.is_finite() && self.acceleration >= 0.0) {
            return Err(invalid("acceleration must be >= 0"));
        }
        if !(self.warp_speed.is_finite() && self.warp_speed >= 0.0) {
            return Err(invalid("warp_speed must be >= 0"));
        }
        if !(self.warp_spawn_radius.is_finite() && self.warp_spawn_radius >= 0.0) {
            return Err(invalid("warp_spawn_radius must be >= 0"));
        }
        if !self.nebula_parallax.is_finite() {
            return Err(invalid("nebula_parallax must be finite"));
        }

        let rates = [
            ("nebula_fade_in", self.nebula_fade_in),
            ("nebula_fade_out", self.nebula_fade_out),
            ("twinkle", self.twinkle),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(invalid(format!("{name} must be in [0, 1]")));
            }
        }
        // A zero fade would keep shooting stars alive forever.
        if !(self.shooting_star_fade > 0.0 && self.shooting_star_fade <= 1.0) {
            return Err(invalid("shooting_star_fade must be in (0, 1]"));
        }

        Ok(())
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON tuning file from disk
    pub fn load(path: &Path) -> Result<Self, FieldError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded field tuning from {}", path.display());
        Ok(config)
    }
}

fn invalid(msg: impl Into<String>) -> FieldError {
    FieldError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers() {
        let config = FieldConfig::default();
        assert_eq!(config.near, LayerConfig::new(100, 0.7, 1.5));
        assert_eq!(config.medium, LayerConfig::new(200, 0.4, 1.0));
        assert_eq!(config.far, LayerConfig::new(400, 0.2, 0.5));
        assert_eq!(config.star_count(), 700);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FieldConfig::from_json(r#"{ "nebula_count": 3, "friction": 0.9 }"#).unwrap();
        assert_eq!(config.nebula_count, 3);
        assert_eq!(config.friction, 0.9);
        assert_eq!(config.shooting_star_count, 2);
        assert_eq!(config.near.count, 100);
    }

    #[test]
    fn test_partial_layer_keeps_layer_defaults() {
        let config = FieldConfig::from_json(r#"{ "near": { "count": 50 }, "far": { "max_radius": 0.8 } }"#).unwrap();
        assert_eq!(config.near, LayerConfig::new(50, 0.7, 1.5));
        assert_eq!(config.medium, LayerConfig::MEDIUM);
        assert_eq!(config.far, LayerConfig::new(400, 0.2, 0.8));

        assert!(FieldConfig::from_json(r#"{ "near": { "cnt": 50 } }"#).is_err());
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = FieldConfig::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));

        let config = FieldConfig {
            friction: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_layer_radius() {
        let mut config = FieldConfig::default();
        config.layer_mut(LayerKind::Far).max_radius = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("far"));
    }

    #[test]
    fn test_rejects_zero_shooting_star_fade() {
        let config = FieldConfig {
            shooting_star_fade: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = FieldConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FieldError::Parse(_)));
    }
}
