//! User preferences
//!
//! Persisted separately from field tuning in LocalStorage (web) or a JSON
//! file (native).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tuning::FieldConfig;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Star population multiplier applied to every layer
    pub fn star_density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Whether to render the nebula background
    pub fn nebula_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset '{other}'")),
        }
    }
}

/// Starfield preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Nebula background
    pub nebulae: bool,
    /// Shooting star streaks
    pub shooting_stars: bool,
    /// Star opacity flicker
    pub twinkle: bool,
    /// Pointer-held warp burst
    pub warp: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no twinkle, no warp)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            nebulae: true,
            shooting_stars: true,
            twinkle: true,
            warp: true,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective warp (respects reduced_motion)
    pub fn effective_warp(&self) -> bool {
        self.warp && !self.reduced_motion
    }

    /// Effective twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        self.twinkle && !self.reduced_motion
    }

    /// Derive the field parameters these preferences call for
    pub fn apply(&self, base: &FieldConfig) -> FieldConfig {
        let mut config = base.clone();
        let density = self.quality.star_density();
        for (kind, layer) in base.layers() {
            config.layer_mut(kind).count = (layer.count as f32 * density).round() as usize;
        }
        if !self.nebulae || !self.quality.nebula_enabled() {
            config.nebula_count = 0;
        }
        if !self.shooting_stars {
            config.shooting_star_count = 0;
        }
        if !self.effective_twinkle() {
            config.twinkle = 0.0;
        }
        config
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "starfield_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, crate::FieldError> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_stock_field() {
        let config = Settings::default().apply(&FieldConfig::default());
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn test_low_quality_thins_field() {
        let config = Settings::from_preset(QualityPreset::Low).apply(&FieldConfig::default());
        assert_eq!(config.near.count, 50);
        assert_eq!(config.medium.count, 100);
        assert_eq!(config.far.count, 200);
        assert_eq!(config.nebula_count, 0);
        assert_eq!(config.shooting_star_count, 2);
    }

    #[test]
    fn test_high_quality_and_toggles() {
        let settings = Settings {
            quality: QualityPreset::High,
            shooting_stars: false,
            reduced_motion: true,
            ..Default::default()
        };
        let config = settings.apply(&FieldConfig::default());
        assert_eq!(config.star_count(), 1050);
        assert_eq!(config.nebula_count, 7);
        assert_eq!(config.shooting_star_count, 0);
        assert_eq!(config.twinkle, 0.0);
        assert!(!settings.effective_warp());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_and_partial() {
        let settings = Settings::from_preset(QualityPreset::High);
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        let partial: Settings = serde_json::from_str(r#"{ "warp": false }"#).unwrap();
        assert!(!partial.warp);
        assert_eq!(partial.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("LOW".parse::<QualityPreset>(), Ok(QualityPreset::Low));
        assert_eq!("med".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert!("ultra".parse::<QualityPreset>().is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("starfield_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "quality": "Low", "show_fps": true }"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.show_fps);

        assert!(Settings::load_from(&path).is_err());
    }
}
