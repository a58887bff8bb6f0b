//! Host event adapter

use crate::settings::Settings;
use crate::sim::{Direction, ParticleField};

/// A host input event, decoupled from any windowing API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent<'a> {
    KeyDown(&'a str),
    KeyUp(&'a str),
    PointerDown,
    PointerUp,
    /// Window lost focus: release everything so keys don't stick
    Blur,
}

/// Map a DOM `KeyboardEvent.key` value to a steering direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Writes host events into a field's input flags
#[derive(Debug, Clone, Copy)]
pub struct InputAdapter {
    warp_enabled: bool,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self { warp_enabled: true }
    }
}

impl InputAdapter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            warp_enabled: settings.effective_warp(),
        }
    }

    /// Apply one event. Returns true if the event was consumed (the host
    /// should suppress its default action, e.g. arrow-key scrolling).
    pub fn handle(&self, field: &mut ParticleField, event: HostEvent<'_>) -> bool {
        match event {
            HostEvent::KeyDown(key) | HostEvent::KeyUp(key) => {
                let Some(direction) = key_direction(key) else {
                    return false;
                };
                field.set_key(direction, matches!(event, HostEvent::KeyDown(_)));
                true
            }
            HostEvent::PointerDown => {
                if self.warp_enabled {
                    field.set_warping(true);
                }
                self.warp_enabled
            }
            HostEvent::PointerUp => {
                field.set_warping(false);
                self.warp_enabled
            }
            HostEvent::Blur => {
                field.input.release_all();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::FieldConfig;

    fn field() -> ParticleField {
        ParticleField::new(FieldConfig::default(), 320.0, 240.0, 3).unwrap()
    }

    #[test]
    fn test_arrow_keys() {
        let mut f = field();
        let adapter = InputAdapter::default();

        assert!(adapter.handle(&mut f, HostEvent::KeyDown("ArrowRight")));
        assert!(f.input.right);
        assert!(adapter.handle(&mut f, HostEvent::KeyUp("ArrowRight")));
        assert!(!f.input.right);

        assert!(!adapter.handle(&mut f, HostEvent::KeyDown("a")));
        assert_eq!(key_direction("ArrowUp"), Some(Direction::Up));
        assert_eq!(key_direction("Up"), None);
    }

    #[test]
    fn test_pointer_toggles_warp() {
        let mut f = field();
        let adapter = InputAdapter::default();

        adapter.handle(&mut f, HostEvent::PointerDown);
        f.update();
        assert!(f.is_warping());

        adapter.handle(&mut f, HostEvent::PointerUp);
        f.update();
        assert!(!f.is_warping());
    }

    #[test]
    fn test_reduced_motion_blocks_warp() {
        let mut f = field();
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let adapter = InputAdapter::new(&settings);

        assert!(!adapter.handle(&mut f, HostEvent::PointerDown));
        f.update();
        assert!(!f.is_warping());
    }

    #[test]
    fn test_blur_releases_keys() {
        let mut f = field();
        let adapter = InputAdapter::default();
        adapter.handle(&mut f, HostEvent::KeyDown("ArrowLeft"));
        adapter.handle(&mut f, HostEvent::PointerDown);
        adapter.handle(&mut f, HostEvent::Blur);
        assert!(!f.input.left);
        assert!(!f.input.warp);
    }
}
