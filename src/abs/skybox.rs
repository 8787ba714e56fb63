//! Cube-mapped background.
//!
//! [`Cubemap`] owns the six-face texture, [`Skybox`] pairs it with a unit cube
//! drawn behind everything else.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use glam::{Mat3, Mat4};
use glow::HasContext;
use image::GenericImageView;

use crate::{
    abs::{Mesh, ShaderProgram},
    render::primitives,
};

/// Face file names in the order OpenGL expects them:
/// +X, -X, +Y, -Y, +Z, -Z.
pub const SKYBOX_FACES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// A cube map texture.
pub struct Cubemap {
    gl: Arc<glow::Context>,
    id: glow::Texture,
}

impl Cubemap {
    /// Loads the six faces, in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn load<P: AsRef<Path>>(gl: &Arc<glow::Context>, faces: &[P; 6]) -> anyhow::Result<Self> {
        // Decode everything first so a missing face leaves no GL object behind.
        let mut images = Vec::with_capacity(6);
        for face in faces {
            let path = face.as_ref();
            let image = image::open(path)
                .with_context(|| format!("failed to load cubemap face {}", path.display()))?;
            images.push(image);
        }

        unsafe {
            let texture = gl.create_texture().map_err(anyhow::Error::msg)?;
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(texture));

            for (i, image) in images.iter().enumerate() {
                let (width, height) = image.dimensions();
                let data = image.to_rgba8().into_raw();
                gl.tex_image_2d(
                    glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                    0,
                    glow::RGBA8 as i32,
                    width as i32,
                    height as i32,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(data.as_slice())),
                );
            }

            gl.tex_parameter_i32(glow::TEXTURE_CUBE_MAP, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_CUBE_MAP, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            for wrap in [glow::TEXTURE_WRAP_S, glow::TEXTURE_WRAP_T, glow::TEXTURE_WRAP_R] {
                gl.tex_parameter_i32(glow::TEXTURE_CUBE_MAP, wrap, glow::CLAMP_TO_EDGE as i32);
            }
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
            })
        }
    }

    /// Binds the cube map to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(self.id));
        }
    }
}

impl Drop for Cubemap {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

/// A skybox drawn last with depth test `LEQUAL`, so it only fills pixels
/// nothing else covered.
pub struct Skybox {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    cubemap: Cubemap,
}

impl Skybox {
    /// Creates a skybox from six face images.
    pub fn new<P: AsRef<Path>>(gl: &Arc<glow::Context>, faces: &[P; 6]) -> anyhow::Result<Self> {
        let cubemap = Cubemap::load(gl, faces)?;
        let mesh = Mesh::new_arrays(gl, &primitives::skybox_cube(), glow::TRIANGLES)?;
        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            cubemap,
        })
    }

    /// Loads the standard faces from `dir`, logging and returning `None` on failure.
    pub fn load_dir(gl: &Arc<glow::Context>, dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        let faces = SKYBOX_FACES.map(|face| dir.join(face));
        match Self::new(gl, &faces) {
            Ok(skybox) => Some(skybox),
            Err(e) => {
                log::warn!("Skybox disabled: {e:#}");
                None
            }
        }
    }

    /// Renders the skybox around the camera.
    pub fn render(&self, shader: &ShaderProgram, view: Mat4, projection: Mat4) {
        unsafe {
            self.gl.depth_func(glow::LEQUAL);
        }

        shader.use_program();
        shader.set_uniform("view", skybox_view(view));
        shader.set_uniform("projection", projection);
        shader.set_sampler("skybox", 0);
        self.cubemap.bind(0);
        self.mesh.draw();

        unsafe {
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);
            self.gl.depth_func(glow::LESS);
        }
    }
}

/// Drops the translation part of a view matrix so the sky stays centred on
/// the camera.
pub fn skybox_view(view: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(view))
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn skybox_view_keeps_rotation_only() {
        let view = Mat4::look_at_rh(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, Vec3::Y);
        let sky = skybox_view(view);
        assert_eq!(sky.w_axis, glam::Vec4::W);
        assert!(sky.x_axis.abs_diff_eq(view.x_axis.truncate().extend(0.0), 1e-6));
        // A direction is rotated the same way by both.
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert!(
            sky.transform_vector3(dir)
                .abs_diff_eq(view.transform_vector3(dir), 1e-6)
        );
    }
}
