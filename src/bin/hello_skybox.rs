//! The camera scene surrounded by a cube-mapped sky.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;
use gl_tutorials::{
    abs::{App, ShaderProgram, Skybox},
    camera::{FlyController, FpsCamera},
    config::Settings,
    demo::{self, Demo, Frame},
    logging,
    other::UpdateContext,
    render::{self, CLEAR_COLOR, scene::CubeOnFloor},
};

struct HelloSkybox {
    program: ShaderProgram,
    skybox_shader: ShaderProgram,
    scene: CubeOnFloor,
    skybox: Option<Skybox>,
    camera: FpsCamera,
    controller: FlyController,
    title: String,
}

impl HelloSkybox {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(&app.gl, &assets, "camera.vert", "camera.frag")?;
        let skybox_shader =
            ShaderProgram::from_assets(&app.gl, &assets, "skybox.vert", "skybox.frag")?;
        let scene = CubeOnFloor::load(&app.gl, &assets)?;
        let skybox = Skybox::load_dir(&app.gl, assets.skybox_dir());

        unsafe {
            app.gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            program,
            skybox_shader,
            scene,
            skybox,
            camera: FpsCamera::new(Vec3::new(0.0, 5.0, 15.0), -180.0, -10.0),
            controller: settings.fly_controller(),
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloSkybox {
    fn update(&mut self, _app: &App, ctx: &UpdateContext, _frame: &Frame) {
        self.controller.update(&mut self.camera, ctx);
    }

    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        render::clear(gl, CLEAR_COLOR);

        let view = self.camera.view_matrix();
        let projection = self.camera.projection(frame.aspect());

        self.program.use_program();
        self.program.set_uniform("view", view);
        self.program.set_uniform("projection", projection);
        self.scene.draw(&self.program);

        // Last, so only pixels the scene left empty pass the depth test.
        if let Some(skybox) = &self.skybox {
            skybox.render(&self.skybox_shader, view, projection);
        }
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Skybox", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    app.set_mouse_captured(true);
    let demo = HelloSkybox::new(&app, &settings)?;
    demo::run(app, demo)
}
