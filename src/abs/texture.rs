//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// Represents a texture stored on the GPU side.
pub struct Texture {
    pub(super) gl: Arc<glow::Context>,
    pub(super) id: glow::Texture,
    pub(super) width: u32,
    pub(super) height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    ///
    /// The image is uploaded as-is, so callers wanting OpenGL's bottom-left
    /// origin should flip it first (see [`Texture::load`]).
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage, mipmaps: bool) -> anyhow::Result<Self> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        Self::new_from_data(gl, width, height, &data, mipmaps)
    }

    /// Creates a new texture from the given raw RGBA data.
    pub fn new_from_data(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        mipmaps: bool,
    ) -> anyhow::Result<Self> {
        unsafe {
            let texture = gl.create_texture().map_err(anyhow::Error::msg)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            let min_filter = if mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Decodes an image file and uploads it, flipped so the first row ends up
    /// at the bottom as OpenGL expects.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>, mipmaps: bool) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .flipv();
        let texture = Self::new(gl, &image, mipmaps)?;
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Like [`Texture::load`], but logs the failure and substitutes a
    /// checkerboard so the program keeps running without the file.
    pub fn load_or_checkerboard(gl: &Arc<glow::Context>, path: impl AsRef<Path>, mipmaps: bool) -> anyhow::Result<Self> {
        match Self::load(gl, path, mipmaps) {
            Ok(texture) => Ok(texture),
            Err(e) => {
                log::warn!("{e:#}; using a checkerboard instead");
                Self::checkerboard(gl)
            }
        }
    }

    /// A magenta and black 8x8 checkerboard.
    pub fn checkerboard(gl: &Arc<glow::Context>) -> anyhow::Result<Self> {
        const SIZE: u32 = 8;
        let data = checkerboard_pixels(SIZE);
        let texture = Self::new_from_data(gl, SIZE, SIZE, &data, false)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture.id));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        Ok(texture)
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }

    /// Clears whatever 2D texture is bound to the specified texture unit.
    pub fn unbind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

fn checkerboard_pixels(size: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            if (x + y) % 2 == 0 {
                data.extend_from_slice(&[255, 0, 255, 255]);
            } else {
                data.extend_from_slice(&[0, 0, 0, 255]);
            }
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_colors() {
        let data = checkerboard_pixels(4);
        assert_eq!(data.len(), 4 * 4 * 4);
        assert_eq!(&data[0..4], &[255, 0, 255, 255]);
        assert_eq!(&data[4..8], &[0, 0, 0, 255]);
        // Second row starts with the opposite colour.
        assert_eq!(&data[16..20], &[0, 0, 0, 255]);
    }
}
