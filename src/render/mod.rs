//! Rendering helpers built on top of [`crate::abs`].

pub mod lighting;
pub mod primitives;
pub mod scene;
pub mod vertex;

use glam::Vec3;
use glow::HasContext;

/// Background of the 3D tutorials.
pub const CLEAR_COLOR: Vec3 = Vec3::new(0.23, 0.38, 0.47);

/// Clears the bound framebuffer's colour and depth.
pub fn clear(gl: &glow::Context, color: Vec3) {
    unsafe {
        gl.clear_color(color.x, color.y, color.z, 1.0);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }
}
