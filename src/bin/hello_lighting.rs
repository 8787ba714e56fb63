//! The showroom lit by a swinging point light. `2` switches between Phong
//! and Blinn-Phong specular.

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
        lighting::{Material, OrbitingLight},
        scene::{self, Bulb, SHOWROOM, SceneObject},
    },
};
use sdl2::keyboard::Keycode;

struct HelloLighting {
    phong: ShaderProgram,
    blinn_phong: ShaderProgram,
    use_blinn: bool,
    bulb_shader: ShaderProgram,
    skybox_shader: ShaderProgram,
    objects: Vec<SceneObject>,
    bulb: Bulb,
    skybox: Option<Skybox>,
    light: OrbitingLight,
    material: Material,
    camera: FpsCamera,
    controller: FlyController,
    title: String,
}

impl HelloLighting {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let gl = &app.gl;
        let assets = settings.assets();
        let phong =
            ShaderProgram::from_assets(gl, &assets, "lighting_phong.vert", "lighting_phong.frag")?;
        let blinn_phong = ShaderProgram::from_assets(
            gl,
            &assets,
            "lighting_phong.vert",
            "lighting_blinn_phong.frag",
        )?;
        let bulb_shader = ShaderProgram::from_assets(gl, &assets, "bulb.vert", "bulb.frag")?;
        let skybox_shader = ShaderProgram::from_assets(gl, &assets, "skybox.vert", "skybox.frag")?;

        let objects = scene::load_scene(gl, &assets, &SHOWROOM)?;
        let bulb = Bulb::load(gl, &assets);
        let skybox = Skybox::load_dir(gl, assets.skybox_dir());

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            phong,
            blinn_phong,
            use_blinn: false,
            bulb_shader,
            skybox_shader,
            objects,
            bulb,
            skybox,
            light: OrbitingLight::new(Vec3::new(0.0, 1.0, 10.0)),
            material: Material::default(),
            camera: FpsCamera::new(Vec3::new(0.0, 3.0, 10.0), -180.0, -10.0),
            controller: settings.fly_controller(),
            title: settings.title.clone(),
        })
    }

    fn active_program(&self) -> &ShaderProgram {
        if self.use_blinn {
            &self.blinn_phong
        } else {
            &self.phong
        }
    }
}

impl Demo for HelloLighting {
    fn update(&mut self, _app: &App, ctx: &UpdateContext, frame: &Frame) {
        if ctx.keyboard.pressed.contains(&Keycode::Num2) {
            self.use_blinn = !self.use_blinn;
            log::info!(
                "Specular model: {}",
                if self.use_blinn { "Blinn-Phong" } else { "Phong" }
            );
        }

        self.controller.update(&mut self.camera, ctx);
        self.light.advance(frame.delta);
    }

    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        render::clear(gl, CLEAR_COLOR);

        let view = self.camera.view_matrix();
        let projection = self.camera.projection(frame.aspect());
        let light_pos = self.light.position();

        let program = self.active_program();
        program.use_program();
        program.set_uniform("view", view);
        program.set_uniform("projection", projection);
        program.set_uniform("viewPos", self.camera.position());
        program.set_uniform("lightPos", light_pos);
        program.set_uniform("lightColor", self.bulb.color);
        self.material.apply(program);
        for object in &self.objects {
            object.draw(program);
        }

        self.bulb
            .draw(&self.bulb_shader, light_pos, view, projection);

        if let Some(skybox) = &self.skybox {
            skybox.render(&self.skybox_shader, view, projection);
        }
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Lighting", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    app.set_mouse_captured(true);
    let demo = HelloLighting::new(&app, &settings)?;
    demo::run(app, demo)
}
