//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::{cell::RefCell, sync::Arc};

use anyhow::{Context, anyhow};
use fxhash::FxHashMap;
use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use crate::assets::Assets;

/// The pipeline stage a [`Shader`] is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex = glow::VERTEX_SHADER as isize,
    Fragment = glow::FRAGMENT_SHADER as isize,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> anyhow::Result<Self> {
        unsafe {
            let shader = gl.create_shader(stage as u32).map_err(anyhow::Error::msg)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(anyhow!("{stage} shader failed to compile: {}", log.trim_end()));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to the given location of the currently bound program.
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for bool {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self as i32);
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self);
        }
    }
}

impl Uniform for Vec2 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_2_f32(Some(location), self.x, self.y);
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_4_f32(Some(location), self.x, self.y, self.z, self.w);
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            // Column major, so no transpose.
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    locations: RefCell<FxHashMap<String, Option<glow::UniformLocation>>>,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> anyhow::Result<Self> {
        unsafe {
            let program = gl.create_program().map_err(anyhow::Error::msg)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(anyhow!("shader program failed to link: {}", log.trim_end()));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
                locations: RefCell::new(FxHashMap::default()),
            })
        }
    }

    /// Reads a vertex and a fragment shader from the asset shader directory
    /// and links them into a program.
    pub fn from_assets(
        gl: &Arc<glow::Context>,
        assets: &Assets,
        vert: &str,
        frag: &str,
    ) -> anyhow::Result<Self> {
        let vert_src = assets.read_shader(vert)?;
        let frag_src = assets.read_shader(frag)?;
        let vert_shader = Shader::new(gl, ShaderStage::Vertex, &vert_src)
            .with_context(|| format!("compiling {vert}"))?;
        let frag_shader = Shader::new(gl, ShaderStage::Fragment, &frag_src)
            .with_context(|| format!("compiling {frag}"))?;
        let program = Self::new(gl, &[&vert_shader, &frag_shader])
            .with_context(|| format!("linking {vert} + {frag}"))?;
        log::debug!("Loaded shader program {vert} + {frag}");
        Ok(program)
    }

    /// Binds the shader program for use.
    /// Must be called before setting uniforms.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    /// Names the program does not use are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.uniform_location(name) {
            value.set_uniform(&self.gl, &location);
        }
    }

    /// Points a sampler uniform at the given texture unit and makes that unit active.
    pub fn set_sampler(&self, name: &str, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
        }
        self.set_uniform(name, unit as i32);
    }

    /// Looks up a uniform location, querying the driver only the first time a
    /// name is seen.
    fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return cached.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.id, name) };
        self.locations
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
