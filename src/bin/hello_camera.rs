//! A crate on a floor explored with a fly camera.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;
use gl_tutorials::{
    abs::{App, ShaderProgram},
    camera::{FlyController, FpsCamera},
    config::Settings,
    demo::{self, Demo, Frame},
    logging,
    other::UpdateContext,
    render::{self, CLEAR_COLOR, scene::CubeOnFloor},
};

/// Five units back from the crate, aimed up and to the right of it.
fn start_camera() -> FpsCamera {
    FpsCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE)
}

struct HelloCamera {
    program: ShaderProgram,
    scene: CubeOnFloor,
    camera: FpsCamera,
    controller: FlyController,
    title: String,
}

impl HelloCamera {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(&app.gl, &assets, "camera.vert", "camera.frag")?;
        let scene = CubeOnFloor::load(&app.gl, &assets)?;

        unsafe {
            app.gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            program,
            scene,
            camera: start_camera(),
            controller: settings.fly_controller(),
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloCamera {
    fn update(&mut self, _app: &App, ctx: &UpdateContext, _frame: &Frame) {
        self.controller.update(&mut self.camera, ctx);
    }

    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        render::clear(gl, CLEAR_COLOR);

        self.program.use_program();
        self.program.set_uniform("view", self.camera.view_matrix());
        self.program
            .set_uniform("projection", self.camera.projection(frame.aspect()));
        self.scene.draw(&self.program);
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Camera", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    app.set_mouse_captured(true);
    let demo = HelloCamera::new(&app, &settings)?;
    demo::run(app, demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_aimed_at_the_corner_target() {
        let camera = start_camera();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
        let expected = (Vec3::ONE - camera.position()).normalize();
        assert!(camera.look().abs_diff_eq(expected, 1e-5));
    }
}
