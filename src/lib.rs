//! Shared building blocks for the OpenGL tutorial programs in `src/bin`.
//!
//! Each program is a small [`demo::Demo`] driven by [`demo::run`]. The thin GPU
//! wrappers live in [`abs`], scene helpers in [`render`].

pub mod abs;
pub mod assets;
pub mod camera;
pub mod config;
pub mod demo;
pub mod fps;
pub mod gui;
pub mod logging;
pub mod obj;
pub mod other;
pub mod render;
