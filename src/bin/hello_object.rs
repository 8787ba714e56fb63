//! Textured OBJ models under a skybox.

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
    render::{
        self, CLEAR_COLOR,
        scene::{self, OBJECT_SCENE, SceneObject},
    },
};

struct HelloObject {
    program: ShaderProgram,
    skybox_shader: ShaderProgram,
    objects: Vec<SceneObject>,
    skybox: Option<Skybox>,
    camera: FpsCamera,
    controller: FlyController,
    title: String,
}

impl HelloObject {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(&app.gl, &assets, "model.vert", "model.frag")?;
        let skybox_shader =
            ShaderProgram::from_assets(&app.gl, &assets, "skybox.vert", "skybox.frag")?;
        let objects = scene::load_scene(&app.gl, &assets, &OBJECT_SCENE)?;
        let skybox = Skybox::load_dir(&app.gl, assets.skybox_dir());

        unsafe {
            app.gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            program,
            skybox_shader,
            objects,
            skybox,
            camera: FpsCamera::new(Vec3::new(0.0, 5.0, 10.0), -180.0, -10.0),
            controller: settings.fly_controller(),
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloObject {
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
        self.program.set_sampler("texSampler1", 0);
        for object in &self.objects {
            object.draw(&self.program);
        }

        if let Some(skybox) = &self.skybox {
            skybox.render(&self.skybox_shader, view, projection);
        }
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Object", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    app.set_mouse_captured(true);
    let demo = HelloObject::new(&app, &settings)?;
    demo::run(app, demo)
}
