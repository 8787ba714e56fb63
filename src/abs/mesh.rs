//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::{path::Path, sync::Arc};

use glow::HasContext;

use crate::render::vertex::ModelVertex;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Creates a new indexed mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> anyhow::Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(anyhow::Error::msg)?;
            let vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;
            let ebo = gl.create_buffer().map_err(anyhow::Error::msg)?;

            gl.bind_vertex_array(Some(vao));
            upload_vertices(gl, vbo, vertices);

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    indices.as_ptr() as *const u8,
                    std::mem::size_of_val(indices),
                ),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            // The element buffer binding is part of the VAO, unbind that first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo: Some(ebo),
                count: indices.len(),
            })
        }
    }

    /// Creates a non-indexed mesh drawn straight from the vertex list.
    pub fn new_arrays<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        draw_mode: u32,
    ) -> anyhow::Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(anyhow::Error::msg)?;
            let vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;

            gl.bind_vertex_array(Some(vao));
            upload_vertices(gl, vbo, vertices);
            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo: None,
                count: vertices.len(),
            })
        }
    }

    /// Loads a Wavefront OBJ model as a triangle list.
    pub fn load_obj(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let vertices: Vec<ModelVertex> = crate::obj::load_obj(path)?;
        log::debug!("Loaded {} ({} vertices)", path.display(), vertices.len());
        Self::new_arrays(gl, &vertices, glow::TRIANGLES)
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the amount of vertices (or indices, for indexed meshes) drawn.
    pub fn vertex_count(&self) -> usize {
        self.count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

unsafe fn upload_vertices<V: Vertex>(gl: &glow::Context, vbo: glow::Buffer, vertices: &[V]) {
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            std::slice::from_raw_parts(vertices.as_ptr() as *const u8, std::mem::size_of_val(vertices)),
            glow::STATIC_DRAW,
        );
    }
}
