//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use glow::HasContext;
use sdl2::video::SwapInterval;

use crate::config::Settings;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] from the given settings.
    /// The width and height options are ignored if `fullscreen` is set to `true`.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let sdl = sdl2::init().map_err(|e| anyhow!("SDL initialization failed: {e}"))?;
        let video_subsystem = sdl
            .video()
            .map_err(|e| anyhow!("SDL video subsystem unavailable: {e}"))?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_context_flags().forward_compatible().set();

        let (width, height) = if settings.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(|e| anyhow!("cannot query display mode: {e}"))?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (settings.width, settings.height)
        };

        let mut window = video_subsystem
            .window(&settings.title, width, height)
            .opengl()
            .resizable()
            .position_centered()
            .build()
            .context("failed to create window")?;
        window
            .set_fullscreen(if settings.fullscreen {
                sdl2::video::FullscreenType::Desktop
            } else {
                sdl2::video::FullscreenType::Off
            })
            .map_err(|e| anyhow!("cannot change fullscreen mode: {e}"))?;

        let gl_context = window
            .gl_create_context()
            .map_err(|e| anyhow!("failed to create OpenGL 3.3 core context: {e}"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| anyhow!("cannot make the OpenGL context current: {e}"))?;

        let interval = if settings.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Swap interval {interval:?} not supported: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl
            .event_pump()
            .map_err(|e| anyhow!("cannot obtain the SDL event pump: {e}"))?;
        let gl = Arc::new(gl);

        unsafe {
            let (w, h) = window.drawable_size();
            gl.viewport(0, 0, w as i32, h as i32);
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Returns the drawable size of the window in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Grabs or releases the mouse. While grabbed the cursor is hidden and
    /// motion events report unbounded relative movement.
    pub fn set_mouse_captured(&self, captured: bool) {
        self.sdl.mouse().set_relative_mouse_mode(captured);
    }
}
