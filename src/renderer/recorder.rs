//! Surface that records draw commands instead of rasterizing them

use glam::Vec2;

use super::{Rgba, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { origin: Vec2, extent: Vec2, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    RadialGradient { center: Vec2, radius: f32, inner: Rgba, outer: Rgba },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: Rgba },
    GlobalAlpha(f32),
}

#[derive(Debug, Clone)]
pub struct CommandRecorder {
    size: Vec2,
    global_alpha: f32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            global_alpha: 1.0,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping size and alpha state
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }

    /// Global alpha in effect after the last command
    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, extent, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::WHITE;

    #[test]
    fn test_records_in_order() {
        let mut rec = CommandRecorder::new(100.0, 50.0);
        rec.clear();
        rec.set_global_alpha(0.3);
        rec.fill_circle(Vec2::new(1.0, 2.0), 0.5, WHITE);
        rec.stroke_line(Vec2::ZERO, Vec2::ONE, 2.0, WHITE);

        assert_eq!(rec.size(), Vec2::new(100.0, 50.0));
        assert_eq!(rec.commands().len(), 4);
        assert_eq!(rec.commands()[1], DrawCommand::GlobalAlpha(0.3));
        assert_eq!(rec.stroke_count(), 1);
        assert_eq!(rec.global_alpha(), 0.3);

        let taken = rec.take();
        assert_eq!(taken[0], DrawCommand::Clear);
        assert!(rec.commands().is_empty());
    }
}
