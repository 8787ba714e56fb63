//! Module to work with OpenGL framebuffers.
//!
//! The tutorials only render off-screen for shadow mapping, so this provides
//! a depth-only [`ShadowMap`].

use std::sync::Arc;

use anyhow::anyhow;
use glow::HasContext;

use crate::abs::Texture;

/// Default edge length of the shadow map in texels.
pub const SHADOW_MAP_SIZE: u32 = 2048;

/// A depth-only framebuffer rendered from the light's point of view.
pub struct ShadowMap {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
    depth_tex: Texture,
}

impl ShadowMap {
    /// Creates a new shadow map with the specified width and height.
    pub fn new(gl: &Arc<glow::Context>, width: u32, height: u32) -> anyhow::Result<Self> {
        unsafe {
            let fbo = gl.create_framebuffer().map_err(anyhow::Error::msg)?;
            let tex = gl.create_texture().map_err(anyhow::Error::msg)?;

            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::DEPTH_COMPONENT as i32,
                width as i32,
                height as i32,
                0,
                glow::DEPTH_COMPONENT,
                glow::FLOAT,
                glow::PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_BORDER as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_BORDER as i32,
            );
            // Everything outside the light frustum reads as "farthest", so it is lit.
            gl.tex_parameter_f32_slice(
                glow::TEXTURE_2D,
                glow::TEXTURE_BORDER_COLOR,
                &[1.0, 1.0, 1.0, 1.0],
            );

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::TEXTURE_2D,
                Some(tex),
                0,
            );
            gl.draw_buffer(glow::NONE);
            gl.read_buffer(glow::NONE);

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);

            let depth_tex = Texture {
                gl: gl.clone(),
                id: tex,
                width,
                height,
            };

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(fbo);
                return Err(anyhow!("shadow map framebuffer incomplete (status {status:#x})"));
            }

            Ok(Self {
                gl: gl.clone(),
                fbo,
                depth_tex,
            })
        }
    }

    /// Binds the framebuffer, matches the viewport to the map and clears depth.
    pub fn begin(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.viewport(
                0,
                0,
                self.depth_tex.width() as i32,
                self.depth_tex.height() as i32,
            );
            self.gl.clear(glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Unbinds the framebuffer, reverting to the default framebuffer.
    pub fn end(gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Binds the depth texture for sampling on the given unit.
    pub fn bind_depth(&self, unit: u32) {
        self.depth_tex.bind(unit);
    }

    /// Returns the depth texture.
    pub fn depth_texture(&self) -> &Texture {
        &self.depth_tex
    }
}

impl Drop for ShadowMap {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.fbo);
        }
    }
}
