//! The showroom with shadows cast by the swinging light.
//!
//! Each frame first renders scene depth from the light into a shadow map,
//! then lights the scene with Blinn-Phong and tests every fragment against
//! that map.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;
use gl_tutorials::{
    abs::{App, SHADOW_MAP_SIZE, ShaderProgram, ShadowMap, Skybox},
    camera::{FlyController, FpsCamera},
    config::Settings,
    demo::{self, Demo, Frame},
    logging,
    other::UpdateContext,
    render::{
        self, CLEAR_COLOR,
        lighting::{Material, OrbitingLight, ShadowProjection},
        scene::{self, Bulb, SHOWROOM, SceneObject},
    },
};

/// Texture unit the shadow map is sampled from.
const SHADOW_UNIT: u32 = 2;

struct HelloShadow {
    program: ShaderProgram,
    depth_shader: ShaderProgram,
    bulb_shader: ShaderProgram,
    skybox_shader: ShaderProgram,
    shadow_map: ShadowMap,
    shadow_projection: ShadowProjection,
    objects: Vec<SceneObject>,
    bulb: Bulb,
    skybox: Option<Skybox>,
    light: OrbitingLight,
    material: Material,
    camera: FpsCamera,
    controller: FlyController,
    title: String,
}

impl HelloShadow {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let gl = &app.gl;
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(
            gl,
            &assets,
            "shadow_lighting.vert",
            "shadow_lighting.frag",
        )?;
        let depth_shader = ShaderProgram::from_assets(gl, &assets, "shadow.vert", "shadow.frag")?;
        let bulb_shader = ShaderProgram::from_assets(gl, &assets, "bulb.vert", "bulb.frag")?;
        let skybox_shader = ShaderProgram::from_assets(gl, &assets, "skybox.vert", "skybox.frag")?;

        let shadow_map = ShadowMap::new(gl, SHADOW_MAP_SIZE, SHADOW_MAP_SIZE)?;
        let objects = scene::load_scene(gl, &assets, &SHOWROOM)?;
        let bulb = Bulb::load(gl, &assets);
        let skybox = Skybox::load_dir(gl, assets.skybox_dir());

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            program,
            depth_shader,
            bulb_shader,
            skybox_shader,
            shadow_map,
            shadow_projection: ShadowProjection::default(),
            objects,
            bulb,
            skybox,
            light: OrbitingLight::new(Vec3::new(0.0, 5.0, 10.0)),
            material: Material::default(),
            camera: FpsCamera::new(Vec3::new(0.0, 5.0, 20.0), -180.0, -10.0),
            controller: settings.fly_controller(),
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloShadow {
    fn update(&mut self, _app: &App, ctx: &UpdateContext, frame: &Frame) {
        self.controller.update(&mut self.camera, ctx);
        self.light.advance(frame.delta);
    }

    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        let light_pos = self.light.position();
        let light_space = self.shadow_projection.light_space_matrix(light_pos);

        // Depth pass
        self.shadow_map.begin();
        self.depth_shader.use_program();
        self.depth_shader.set_uniform("lightSpaceMatrix", light_space);
        for object in &self.objects {
            object.draw_depth(&self.depth_shader);
        }
        ShadowMap::end(gl);

        // Lighting pass
        unsafe {
            gl.viewport(0, 0, frame.width as i32, frame.height as i32);
        }
        render::clear(gl, CLEAR_COLOR);

        let view = self.camera.view_matrix();
        let projection = self.camera.projection(frame.aspect());

        self.program.use_program();
        self.program.set_uniform("view", view);
        self.program.set_uniform("projection", projection);
        self.program.set_uniform("viewPos", self.camera.position());
        self.program.set_uniform("lightPos", light_pos);
        self.program.set_uniform("lightColor", self.bulb.color);
        self.program.set_uniform("lightSpaceMatrix", light_space);
        self.material.apply(&self.program);
        self.program.set_sampler("shadowMap", SHADOW_UNIT);
        self.shadow_map.bind_depth(SHADOW_UNIT);
        for object in &self.objects {
            object.draw(&self.program);
        }
        self.shadow_map.depth_texture().unbind(SHADOW_UNIT);

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
    let settings = Settings::new("Hello Shadow", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    app.set_mouse_captured(true);
    let demo = HelloShadow::new(&app, &settings)?;
    demo::run(app, demo)
}
