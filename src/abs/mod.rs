//! This module contains the thin OpenGL wrappers shared by every tutorial,
//! including application setup, shader management, meshes, textures, the
//! shadow map framebuffer and the skybox.

pub mod app;
pub mod framebuffer;
pub mod mesh;
pub mod shader;
pub mod skybox;
pub mod texture;

pub use app::*;
pub use framebuffer::*;
pub use mesh::*;
pub use shader::*;
pub use skybox::*;
pub use texture::*;
