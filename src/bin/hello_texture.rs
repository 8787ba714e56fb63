//! A quad blending two textures.

use std::sync::Arc;

use gl_tutorials::{
    abs::{App, Mesh, ShaderProgram, Texture},
    config::Settings,
    demo::{self, Demo, Frame},
    logging,
    render::{self, CLEAR_COLOR, primitives},
};

struct HelloTexture {
    program: ShaderProgram,
    quad: Mesh,
    crate_texture: Texture,
    airplane: Texture,
    title: String,
}

impl HelloTexture {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let assets = settings.assets();
        let program =
            ShaderProgram::from_assets(&app.gl, &assets, "texture.vert", "texture.frag")?;
        let quad = Mesh::new(
            &app.gl,
            &primitives::textured_quad(),
            &primitives::QUAD_INDICES,
            glow::TRIANGLES,
        )?;
        let crate_texture =
            Texture::load_or_checkerboard(&app.gl, assets.texture("crate.jpg"), true)?;
        let airplane =
            Texture::load_or_checkerboard(&app.gl, assets.texture("airplane.png"), true)?;

        Ok(Self {
            program,
            quad,
            crate_texture,
            airplane,
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloTexture {
    fn render(&mut self, gl: &Arc<glow::Context>, _frame: &Frame) {
        render::clear(gl, CLEAR_COLOR);

        self.program.use_program();
        self.program.set_sampler("texSampler1", 0);
        self.crate_texture.bind(0);
        self.program.set_sampler("texSampler2", 1);
        self.airplane.bind(1);

        self.quad.draw();

        self.airplane.unbind(1);
        self.crate_texture.unbind(0);
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello Texture", 400, 300).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    let demo = HelloTexture::new(&app, &settings)?;
    demo::run(app, demo)
}
