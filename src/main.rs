//! Starfield entry point
//!
//! Web: mounts onto `<canvas id="canvas">` and runs from requestAnimationFrame.
//! Native: headless renderer that simulates an input timeline and writes a PNG.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_starfield {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use starfield::platform::{HostEvent, InputAdapter};
    use starfield::renderer::CanvasSurface;
    use starfield::{FieldConfig, FrameDriver, ParticleField, Settings};

    /// Page instance holding all state
    struct Starfield {
        driver: FrameDriver,
        surface: CanvasSurface,
        adapter: InputAdapter,
        settings: Settings,
    }

    impl Starfield {
        /// Feed a host event to the field
        fn handle(&mut self, event: HostEvent<'_>) -> bool {
            self.adapter.handle(self.driver.field_mut(), event)
        }

        /// Update FPS readout in DOM
        fn update_hud(&self) {
            if !self.settings.show_fps {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("fps") {
                el.set_text_content(Some(&self.driver.fps().to_string()));
            }
        }
    }

    /// Size the canvas backing store to the window
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let (width, height) = web_sys::window()
            .map(|w| {
                let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
                let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
                (width as u32, height as u32)
            })
            .unwrap_or((800, 600));
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));
        (width.max(1), height.max(1))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Starfield starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = fit_canvas(&canvas);

        let settings = Settings::load();
        let config = settings.apply(&FieldConfig::default());
        let seed = js_sys::Date::now() as u64;

        let field = match ParticleField::new(config, width as f32, height as f32, seed) {
            Ok(field) => field,
            Err(e) => {
                log::error!("Failed to build starfield: {}", e);
                return;
            }
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };

        let starfield = Rc::new(RefCell::new(Starfield {
            driver: FrameDriver::new(field),
            surface,
            adapter: InputAdapter::new(&settings),
            settings,
        }));

        setup_input_handlers(starfield.clone());
        setup_resize(&canvas, starfield.clone());
        setup_lifecycle(starfield.clone());

        request_animation_frame(starfield);

        log::info!("Starfield running!");
    }

    fn setup_input_handlers(starfield: Rc<RefCell<Starfield>>) {
        let window = web_sys::window().unwrap();

        {
            let starfield = starfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                starfield.borrow_mut().handle(HostEvent::PointerDown);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let starfield = starfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                starfield.borrow_mut().handle(HostEvent::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let starfield = starfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut s = starfield.borrow_mut();
                if s.handle(HostEvent::KeyDown(&key)) {
                    event.prevent_default();
                } else if key == "f" || key == "F" {
                    s.settings.show_fps = !s.settings.show_fps;
                    s.settings.save();
                    log::info!("FPS counter: {}", s.settings.show_fps);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if starfield.borrow_mut().handle(HostEvent::KeyUp(&key)) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, starfield: Rc<RefCell<Starfield>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas);
            let mut s = starfield.borrow_mut();
            s.surface.resize(width, height);
            if let Err(e) = s.driver.field_mut().resize(width as f32, height as f32) {
                log::warn!("Ignoring resize: {}", e);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_lifecycle(starfield: Rc<RefCell<Starfield>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let starfield = starfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                starfield.borrow_mut().handle(HostEvent::Blur);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let starfield = starfield.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                    // Don't fast-forward through the time spent hidden
                    starfield.borrow_mut().driver.reset_clock();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                starfield.borrow_mut().driver.cancel();
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(starfield: Rc<RefCell<Starfield>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(starfield, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(starfield: Rc<RefCell<Starfield>>, time: f64) {
        let running = {
            let mut guard = starfield.borrow_mut();
            let s = &mut *guard;
            let running = s.driver.frame(time, &mut s.surface);
            s.update_hud();
            running
        };

        if running {
            request_animation_frame(starfield);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_starfield::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use starfield::consts::FRAME_DT;
    use starfield::renderer::Raster;
    use starfield::sim::Direction;
    use starfield::{FieldConfig, FieldError, FrameDriver, ParticleField, QualityPreset, Settings};

    /// Render a starfield frame without a browser.
    #[derive(Parser, Debug)]
    #[command(name = "starfield", about = "Headless starfield renderer")]
    pub struct Cli {
        /// Surface width in pixels.
        #[arg(long, default_value_t = 800)]
        pub width: u32,

        /// Surface height in pixels.
        #[arg(long, default_value_t = 600)]
        pub height: u32,

        /// Number of animation frames to simulate.
        #[arg(long, default_value_t = 120)]
        pub frames: u32,

        /// RNG seed (random if omitted).
        #[arg(long)]
        pub seed: Option<u64>,

        /// Direction key held for the whole run (repeatable).
        #[arg(long)]
        pub hold: Vec<Direction>,

        /// Frame at which the pointer is pressed (warp engaged until the end).
        #[arg(long)]
        pub warp_at: Option<u32>,

        /// JSON field tuning file.
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// JSON settings file.
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Quality preset override (low, medium, high).
        #[arg(long)]
        pub quality: Option<QualityPreset>,

        /// PNG output path.
        #[arg(long, default_value = "starfield.png")]
        pub output: PathBuf,
    }

    pub fn run(cli: Cli) -> Result<(), FieldError> {
        let base = match &cli.config {
            Some(path) => FieldConfig::load(path)?,
            None => FieldConfig::default(),
        };
        let mut settings = match &cli.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some(quality) = cli.quality {
            settings.quality = quality;
        }

        let seed = cli.seed.unwrap_or_else(rand::random);
        let field = ParticleField::new(
            settings.apply(&base),
            cli.width as f32,
            cli.height as f32,
            seed,
        )?;
        let mut driver = FrameDriver::new(field);
        let mut raster = Raster::new(cli.width, cli.height);

        for direction in &cli.hold {
            driver.field_mut().set_key(*direction, true);
        }

        let frame_ms = FRAME_DT as f64 * 1000.0;
        for frame in 0..cli.frames {
            if cli.warp_at == Some(frame) {
                if settings.effective_warp() {
                    driver.field_mut().set_warping(true);
                } else {
                    log::warn!("Warp disabled by settings; ignoring --warp-at");
                }
            }
            driver.frame(frame as f64 * frame_ms, &mut raster);
        }
        driver.cancel();

        let field = driver.field();
        log::info!(
            "Simulated {} updates, velocity ({:.3}, {:.3}), warping: {}",
            field.frame(),
            field.velocity().x,
            field.velocity().y,
            field.is_warping()
        );

        raster.save_png(&cli.output)?;
        println!("{}", cli.output.display());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_args() {
            let cli = Cli::parse_from([
                "starfield", "--hold", "right", "--hold", "up", "--warp-at", "10", "--quality", "low",
            ]);
            assert_eq!(cli.hold, vec![Direction::Right, Direction::Up]);
            assert_eq!(cli.warp_at, Some(10));
            assert_eq!(cli.quality, Some(QualityPreset::Low));
            assert_eq!(cli.width, 800);
        }

        #[test]
        fn test_run_writes_png() {
            let output = std::env::temp_dir().join(format!("starfield_{}.png", std::process::id()));
            let cli = Cli::parse_from([
                "starfield",
                "--width", "64",
                "--height", "48",
                "--frames", "20",
                "--seed", "5",
                "--warp-at", "10",
                "--output", output.to_str().unwrap(),
            ]);
            run(cli).unwrap();
            let written = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            let _ = std::fs::remove_file(&output);
            assert!(written > 0);
        }

        #[test]
        fn test_run_rejects_zero_size() {
            let cli = Cli::parse_from(["starfield", "--width", "0"]);
            assert!(matches!(run(cli), Err(FieldError::InvalidSurface { .. })));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Starfield (native) starting...");

    if let Err(e) = headless::run(headless::Cli::parse()) {
        log::error!("{}", e);
        eprintln!("starfield: {e}");
        std::process::exit(1);
    }
}
