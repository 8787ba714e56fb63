//! Wavefront OBJ loading.
//!
//! Parsing is done by `tobj`; this module only flattens the result into a
//! non-indexed triangle list of [`ModelVertex`].

use std::{io::BufRead, path::Path};

use anyhow::Context;
use glam::{Vec2, Vec3};

use crate::render::vertex::ModelVertex;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Loads an OBJ file. Material libraries are optional.
pub fn load_obj(path: impl AsRef<Path>) -> anyhow::Result<Vec<ModelVertex>> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(path, &load_options())
        .with_context(|| format!("failed to parse OBJ {}", path.display()))?;
    if let Err(e) = materials {
        log::warn!("{}: materials ignored ({e})", path.display());
    }
    Ok(flatten_models(&models))
}

/// Parses OBJ text from a reader. `mtllib` statements are ignored.
pub fn parse_obj(reader: &mut impl BufRead) -> anyhow::Result<Vec<ModelVertex>> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))
        .context("failed to parse OBJ data")?;
    Ok(flatten_models(&models))
}

/// Expands every face corner of every shape into its own vertex.
/// Corners without a normal or texture coordinate get zeros.
pub fn flatten_models(models: &[tobj::Model]) -> Vec<ModelVertex> {
    let total = models.iter().map(|m| m.mesh.indices.len()).sum();
    let mut vertices = Vec::with_capacity(total);

    for model in models {
        let mesh = &model.mesh;
        for (corner, &index) in mesh.indices.iter().enumerate() {
            let position = vec3_at(&mesh.positions, index).unwrap_or(Vec3::ZERO);
            let normal = mesh
                .normal_indices
                .get(corner)
                .and_then(|&n| vec3_at(&mesh.normals, n))
                .unwrap_or(Vec3::ZERO);
            let tex_coords = mesh
                .texcoord_indices
                .get(corner)
                .and_then(|&t| vec2_at(&mesh.texcoords, t))
                .unwrap_or(Vec2::ZERO);

            vertices.push(ModelVertex {
                position,
                normal,
                tex_coords,
            });
        }
    }

    vertices
}

fn vec3_at(data: &[f32], index: u32) -> Option<Vec3> {
    let i = index as usize * 3;
    data.get(i..i + 3).map(Vec3::from_slice)
}

fn vec2_at(data: &[f32], index: u32) -> Option<Vec2> {
    let i = index as usize * 2;
    data.get(i..i + 2).map(Vec2::from_slice)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const QUAD: &str = "\
v -1.0 0.0 -1.0
v  1.0 0.0 -1.0
v  1.0 0.0  1.0
v -1.0 0.0  1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 1.0 0.0
f 1/1/1 4/4/1 3/3/1 2/2/1
";

    #[test]
    fn quad_face_is_triangulated() {
        let vertices = parse_obj(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.normal == Vec3::Y));
        assert_eq!(vertices[0].position, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(vertices[0].tex_coords, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let vertices = parse_obj(&mut Cursor::new(src)).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, Vec3::X);
        assert!(vertices.iter().all(|v| v.normal == Vec3::ZERO));
        assert!(vertices.iter().all(|v| v.tex_coords == Vec2::ZERO));
    }

    #[test]
    fn shapes_are_concatenated() {
        let src = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let vertices = parse_obj(&mut Cursor::new(src)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[3].position, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn shipped_crate_model_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/crate.obj");
        let vertices = load_obj(path).unwrap();
        assert_eq!(vertices.len(), 36);
        assert!(vertices.iter().all(|v| (v.normal.length() - 1.0).abs() < 1e-5));
    }
}
