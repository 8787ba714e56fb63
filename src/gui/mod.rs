//! Immediate-mode overlay drawn on top of a 3D scene.

mod input;

use std::{sync::Arc, time::Instant};

use egui::{Modifiers, Pos2, RawInput, Rect, ViewportId, vec2};
use glow::HasContext;
use sdl2::event::Event;

pub use input::{map_button, map_key, map_modifiers};

/// An egui context painted with `egui_glow` into the current framebuffer.
pub struct GuiLayer {
    gl: Arc<glow::Context>,
    ctx: egui::Context,
    painter: egui_glow::Painter,
    events: Vec<egui::Event>,
    pointer: Pos2,
    modifiers: Modifiers,
    start: Instant,
}

impl GuiLayer {
    pub fn new(gl: &Arc<glow::Context>) -> anyhow::Result<Self> {
        let painter = egui_glow::Painter::new(gl.clone(), "", None, false)
            .map_err(|e| anyhow::anyhow!("failed to create GUI painter: {e:?}"))?;

        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());

        Ok(Self {
            gl: gl.clone(),
            ctx,
            painter,
            events: Vec::new(),
            pointer: Pos2::ZERO,
            modifiers: Modifiers::default(),
            start: Instant::now(),
        })
    }

    /// Queues an SDL event for the next [`GuiLayer::run`].
    pub fn handle_event(&mut self, event: &Event) {
        let events = input::translate(event, &mut self.pointer, &mut self.modifiers);
        self.events.extend(events);
    }

    /// True while the pointer is over a window or a widget is being dragged.
    pub fn wants_pointer_input(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Builds the UI with `build` and paints it over the framebuffer.
    ///
    /// `drawable` is the framebuffer size in pixels. egui lays out in window
    /// points, the unit SDL reports mouse positions in.
    ///
    /// Leaves depth testing on and blending and scissoring off, the state
    /// the scene passes expect.
    pub fn run(
        &mut self,
        drawable: (u32, u32),
        pixels_per_point: f32,
        build: impl FnMut(&egui::Context),
    ) {
        let (width, height) = drawable;
        let mut raw_input = RawInput {
            screen_rect: Some(screen_rect(drawable, pixels_per_point)),
            time: Some(self.start.elapsed().as_secs_f64()),
            modifiers: self.modifiers,
            events: std::mem::take(&mut self.events),
            ..Default::default()
        };
        raw_input
            .viewports
            .entry(ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(pixels_per_point);

        let output = self.ctx.run(raw_input, build);
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.painter.paint_and_update_textures(
            [width, height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );

        unsafe {
            self.gl.disable(glow::SCISSOR_TEST);
            self.gl.disable(glow::BLEND);
            self.gl.enable(glow::DEPTH_TEST);
        }
    }
}

/// The framebuffer area in points.
fn screen_rect((width, height): (u32, u32), pixels_per_point: f32) -> Rect {
    Rect::from_min_size(
        Pos2::ZERO,
        vec2(width as f32, height as f32) / pixels_per_point,
    )
}

impl Drop for GuiLayer {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_rect_is_in_points() {
        let rect = screen_rect((1600, 1200), 2.0);
        assert_eq!(rect.size(), vec2(800.0, 600.0));
        assert_eq!(screen_rect((800, 600), 1.0).max, Pos2::new(800.0, 600.0));
    }
}
