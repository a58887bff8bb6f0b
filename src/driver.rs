//! Fixed-timestep frame loop
//!
//! The host calls [`FrameDriver::frame`] from its animation callback with a
//! millisecond timestamp. The driver runs as many fixed `update()` steps as
//! the elapsed time covers, then draws once.

use crate::consts::*;
use crate::renderer::Surface;
use crate::sim::ParticleField;

pub struct FrameDriver {
    field: ParticleField,
    accumulator: f32,
    last_time: Option<f64>,
    running: bool,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    frames_drawn: u64,
}

impl FrameDriver {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            accumulator: 0.0,
            last_time: None,
            running: true,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            frames_drawn: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    /// Run simulation steps for the time elapsed since the previous call.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }

        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);

        // Vsync jitter would otherwise alternate zero and two steps per frame
        let dt = if (dt - FRAME_DT).abs() < FRAME_DT_SNAP {
            FRAME_DT
        } else {
            dt.clamp(0.0, MAX_FRAME_DT)
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.field.update();
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }

        self.track_fps(time_ms);
        substeps
    }

    /// Advance then draw. Returns false once cancelled; the host should stop
    /// scheduling further frames.
    pub fn frame<S: Surface + ?Sized>(&mut self, time_ms: f64, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        self.advance(time_ms);
        self.field.draw(surface);
        self.frames_drawn += 1;
        true
    }

    /// Stop the loop. Further `frame()` calls do nothing.
    pub fn cancel(&mut self) {
        if self.running {
            log::info!(
                "Frame driver stopped after {} frames ({} updates)",
                self.frames_drawn,
                self.field.frame()
            );
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forget the previous timestamp so a long pause (hidden tab) is not
    /// credited as elapsed time
    pub fn reset_clock(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn track_fps(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits at the next write slot
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;
    use crate::tuning::FieldConfig;

    fn driver() -> FrameDriver {
        let field = ParticleField::new(FieldConfig::default(), 800.0, 600.0, 1).unwrap();
        FrameDriver::new(field)
    }

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut d = driver();
        assert_eq!(d.advance(1000.0), 1);
        assert_eq!(d.field().frame(), 1);
    }

    #[test]
    fn test_steady_rate_averages_one_step_per_frame() {
        let mut d = driver();
        let mut surface = CommandRecorder::new(800.0, 600.0);
        let frame_ms = 1000.0 / 60.0;
        for i in 1..=120 {
            assert!(d.frame(i as f64 * frame_ms, &mut surface));
        }
        let steps = d.field().frame();
        assert!((118..=121).contains(&steps), "steps = {steps}");
        assert_eq!(d.frames_drawn(), 120);
        assert!((58..=62).contains(&d.fps()), "fps = {}", d.fps());
    }

    #[test]
    fn test_jittered_frames_step_once_each() {
        let mut d = driver();
        let frame_ms = 1000.0 / 60.0;
        for i in 0..600 {
            let jitter = if i % 2 == 0 { 0.3 } else { -0.3 };
            let steps = d.advance(1000.0 + i as f64 * frame_ms + jitter);
            assert_eq!(steps, 1, "frame {i}");
        }
        assert_eq!(d.field().frame(), 600);
    }

    #[test]
    fn test_exact_rate_steps_once_each() {
        let mut d = driver();
        let frame_ms = 1000.0 / 60.0;
        for i in 0..240 {
            assert_eq!(d.advance(i as f64 * frame_ms), 1, "frame {i}");
        }
    }

    #[test]
    fn test_slow_display_steps_twice() {
        let mut d = driver();
        let frame_ms = 1000.0 / 30.0;
        d.advance(0.0);
        let total: u32 = (1..=60).map(|i| d.advance(i as f64 * frame_ms)).sum();
        assert!((119..=121).contains(&total), "total = {total}");
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut d = driver();
        d.advance(0.0);
        let steps = d.advance(5000.0);
        // 0.1 s is six frames, give or take float rounding
        assert!(steps == MAX_SUBSTEPS || steps == MAX_SUBSTEPS - 1, "steps = {steps}");
        // Clamped gap leaves nothing to catch up on
        assert_eq!(d.advance(5000.0), 0);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut d = driver();
        d.advance(1000.0);
        assert_eq!(d.advance(900.0), 0);
    }

    #[test]
    fn test_cancel_stops_frames() {
        let mut d = driver();
        let mut surface = CommandRecorder::new(800.0, 600.0);
        assert!(d.frame(0.0, &mut surface));
        d.cancel();
        assert!(!d.is_running());

        surface.clear_commands();
        assert!(!d.frame(16.0, &mut surface));
        assert!(surface.commands().is_empty());
        assert_eq!(d.advance(100.0), 0);
        assert_eq!(d.field().frame(), 1);
    }

    #[test]
    fn test_reset_clock() {
        let mut d = driver();
        d.advance(0.0);
        d.reset_clock();
        // Treated as a fresh start rather than a 60 s gap
        assert_eq!(d.advance(60_000.0), 1);
    }
}
