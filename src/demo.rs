//! The frame loop shared by every tutorial program.
//!
//! A program implements [`Demo`] and hands it to [`run`], which owns event
//! polling, timing, the wireframe toggle and the FPS title.

use std::{sync::Arc, time::Instant};

use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use crate::{
    abs::App,
    fps::{FpsCounter, FrameStats},
    other::{InputState, UpdateContext},
};

/// Timing and framebuffer size for the frame being produced.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Seconds since the loop started.
    pub time: f64,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub width: u32,
    pub height: u32,
    /// Framebuffer pixels per window point. Above 1 on HiDPI displays.
    pub pixels_per_point: f32,
    /// The most recent frame rate report, once one has been made.
    pub stats: Option<FrameStats>,
}

impl Frame {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Framebuffer pixels per window point. SDL reports mouse coordinates in
/// points, GL wants pixels.
pub fn pixels_per_point(drawable: (u32, u32), window: (u32, u32)) -> f32 {
    if window.0 == 0 || drawable.0 == 0 {
        1.0
    } else {
        drawable.0 as f32 / window.0 as f32
    }
}

/// One tutorial program.
pub trait Demo {
    /// Sees every event before the loop acts on it.
    fn handle_event(&mut self, _event: &Event) {}

    /// Advances state. Called once per frame after events are polled.
    fn update(&mut self, _app: &App, _ctx: &UpdateContext, _frame: &Frame) {}

    /// Draws the frame into the default framebuffer.
    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame);

    /// Key that toggles wireframe rendering.
    fn wireframe_key(&self) -> Option<Keycode> {
        Some(Keycode::Num1)
    }

    /// Prefix of the FPS window title. `None` leaves the title alone.
    fn fps_label(&self) -> Option<&str> {
        None
    }

    /// While true, Escape and the wireframe key are left to the demo.
    fn captures_keyboard(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopAction {
    Quit,
    ToggleWireframe,
    Resize,
}

/// What the loop itself does with `event`, besides passing it on.
fn loop_action(
    event: &Event,
    wireframe_key: Option<Keycode>,
    keyboard_captured: bool,
) -> Option<LoopAction> {
    match event {
        Event::Quit { .. } => Some(LoopAction::Quit),
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } if !keyboard_captured => Some(LoopAction::Quit),
        Event::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } if !keyboard_captured && wireframe_key == Some(*keycode) => {
            Some(LoopAction::ToggleWireframe)
        }
        Event::Window {
            win_event: WindowEvent::SizeChanged(..),
            ..
        } => Some(LoopAction::Resize),
        _ => None,
    }
}

/// Frame timing and the FPS counter fed from it.
struct FrameClock {
    start: Instant,
    last: Instant,
    fps: FpsCounter,
}

impl FrameClock {
    fn new(start: Instant) -> Self {
        Self {
            start,
            last: start,
            fps: FpsCounter::new(),
        }
    }

    /// Returns the time since the start, the delta since the previous tick
    /// and a fresh report when one is due.
    fn tick(&mut self, now: Instant) -> (f64, f32, Option<FrameStats>) {
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        let time = now.duration_since(self.start).as_secs_f64();
        (time, delta, self.fps.tick(time))
    }

    fn stats(&self) -> Option<FrameStats> {
        self.fps.latest()
    }
}

fn framebuffer_size(window: &sdl2::video::Window) -> (u32, u32, f32) {
    let (width, height) = window.drawable_size();
    let ppp = pixels_per_point((width, height), window.size());
    (width, height, ppp)
}

/// Runs `demo` until the window is closed or Escape is pressed.
pub fn run<D: Demo>(mut app: App, mut demo: D) -> anyhow::Result<()> {
    let mut input = InputState::default();
    let mut clock = FrameClock::new(Instant::now());
    let mut wireframe = false;
    let (mut width, mut height, mut ppp) = framebuffer_size(&app.window);
    if ppp != 1.0 {
        log::info!("Framebuffer is {width}x{height} at {ppp} pixels per point");
    }

    'running: loop {
        let (time, delta, report) = clock.tick(Instant::now());

        if let Some(stats) = report {
            if let Some(label) = demo.fps_label() {
                app.window.set_title(&stats.title(label))?;
            }
        }

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            demo.handle_event(&event);
            input.handle_event(&event);
            let action = loop_action(&event, demo.wireframe_key(), demo.captures_keyboard());
            match action {
                Some(LoopAction::Quit) => break 'running,
                Some(LoopAction::ToggleWireframe) => {
                    wireframe = !wireframe;
                    let mode = if wireframe { glow::LINE } else { glow::FILL };
                    unsafe {
                        app.gl.polygon_mode(glow::FRONT_AND_BACK, mode);
                    }
                }
                Some(LoopAction::Resize) => {
                    (width, height, ppp) = framebuffer_size(&app.window);
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    log::debug!("Framebuffer resized to {width}x{height}");
                }
                None => {}
            }
        }

        let frame = Frame {
            time,
            delta,
            width,
            height,
            pixels_per_point: ppp,
            stats: clock.stats(),
        };

        let ctx = input.context(delta);
        demo.update(&app, &ctx, &frame);
        demo.render(&app.gl, &frame);

        app.window.gl_swap_window();
    }

    log::info!("Closing {}", app.window.title());
    // GL resources go first, while the context is still current.
    drop(demo);
    drop(app);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sdl2::keyboard::Mod;

    use super::*;

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    #[test]
    fn aspect_survives_minimised_windows() {
        let frame = Frame {
            time: 0.0,
            delta: 0.0,
            width: 800,
            height: 0,
            pixels_per_point: 1.0,
            stats: None,
        };
        assert_eq!(frame.aspect(), 800.0);

        let frame = Frame {
            height: 600,
            ..frame
        };
        assert!((frame.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn retina_framebuffers_have_two_pixels_per_point() {
        assert_eq!(pixels_per_point((1600, 1200), (800, 600)), 2.0);
        assert_eq!(pixels_per_point((800, 600), (800, 600)), 1.0);
        assert_eq!(pixels_per_point((0, 0), (0, 0)), 1.0);
        assert_eq!(pixels_per_point((0, 0), (800, 600)), 1.0);
    }

    #[test]
    fn escape_and_wireframe_key_drive_the_loop() {
        let wireframe = Some(Keycode::Num1);
        assert_eq!(
            loop_action(&key_down(Keycode::Escape, false), wireframe, false),
            Some(LoopAction::Quit)
        );
        assert_eq!(
            loop_action(&key_down(Keycode::Num1, false), wireframe, false),
            Some(LoopAction::ToggleWireframe)
        );
        assert_eq!(loop_action(&key_down(Keycode::Num1, true), wireframe, false), None);
        assert_eq!(loop_action(&key_down(Keycode::Num1, false), None, false), None);

        let resize = Event::Window {
            timestamp: 0,
            window_id: 0,
            win_event: WindowEvent::SizeChanged(1024, 768),
        };
        assert_eq!(loop_action(&resize, wireframe, false), Some(LoopAction::Resize));
    }

    #[test]
    fn captured_keyboard_keeps_escape_and_wireframe_key() {
        let wireframe = Some(Keycode::Num1);
        assert_eq!(loop_action(&key_down(Keycode::Escape, false), wireframe, true), None);
        assert_eq!(loop_action(&key_down(Keycode::Num1, false), wireframe, true), None);
        // Closing the window still works.
        let quit = Event::Quit { timestamp: 0 };
        assert_eq!(loop_action(&quit, wireframe, true), Some(LoopAction::Quit));
    }

    #[test]
    fn clock_reports_stats_to_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.stats(), None);

        let (time, delta, report) = clock.tick(start + Duration::from_millis(100));
        assert!((time - 0.1).abs() < 1e-9);
        assert!((delta - 0.1).abs() < 1e-6);
        assert_eq!(report, None);

        clock.tick(start + Duration::from_millis(200));
        let (_, _, report) = clock.tick(start + Duration::from_millis(300));
        assert!(report.is_some());
        assert_eq!(clock.stats(), report);
    }
}
