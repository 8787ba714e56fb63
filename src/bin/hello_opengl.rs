//! An empty window cleared to a dark teal.

use std::sync::Arc;

use glam::Vec3;
use gl_tutorials::{
    abs::App,
    config::Settings,
    demo::{self, Demo, Frame},
    logging, render,
};
use sdl2::keyboard::Keycode;

const BACKGROUND: Vec3 = Vec3::new(0.07, 0.13, 0.17);

struct HelloOpenGl;

impl Demo for HelloOpenGl {
    fn render(&mut self, gl: &Arc<glow::Context>, _frame: &Frame) {
        render::clear(gl, BACKGROUND);
    }

    fn wireframe_key(&self) -> Option<Keycode> {
        None
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello OpenGL", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    demo::run(app, HelloOpenGl)
}
