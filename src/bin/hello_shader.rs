//! A quad whose colour and position are driven by uniforms.

use std::sync::Arc;

use glam::{Vec2, Vec4};
use gl_tutorials::{
    abs::{App, Mesh, ShaderProgram},
    config::Settings,
    demo::{self, Demo, Frame},
    logging,
    render::{self, CLEAR_COLOR, primitives},
};
use sdl2::keyboard::Keycode;

struct HelloShader {
    program: ShaderProgram,
    quad: Mesh,
    title: String,
}

impl HelloShader {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(&app.gl, &assets, "basic.vert", "basic.frag")?;
        let quad = Mesh::new(
            &app.gl,
            &primitives::quad(),
            &primitives::QUAD_INDICES,
            glow::TRIANGLES,
        )?;
        Ok(Self {
            program,
            quad,
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloShader {
    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        render::clear(gl, CLEAR_COLOR);

        let t = frame.time as f32;
        let blue = (t.sin() / 2.0) + 0.5;
        let offset = Vec2::new(t.sin() / 2.0, t.cos() / 2.0);

        self.program.use_program();
        self.program.set_uniform("vertColor", Vec4::new(0.0, 0.0, blue, 1.0));
        self.program.set_uniform("posOffset", offset);
        self.quad.draw();
    }

    fn wireframe_key(&self) -> Option<Keycode> {
        Some(Keycode::W)
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Shader", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    let demo = HelloShader::new(&app, &settings)?;
    demo::run(app, demo)
}
