//! Hand-written geometry: a quad, a textured cube and the skybox cube.

use glam::{Vec2, Vec3};

use crate::render::vertex::{PositionVertex, TexturedVertex};

/// Two triangles sharing the quad's diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Corners of a unit quad centred on the origin: top left, top right,
/// bottom right, bottom left.
const QUAD_CORNERS: [[f32; 5]; 4] = [
    [-0.5, 0.5, 0.0, 0.0, 1.0],
    [0.5, 0.5, 0.0, 1.0, 1.0],
    [0.5, -0.5, 0.0, 1.0, 0.0],
    [-0.5, -0.5, 0.0, 0.0, 0.0],
];

pub fn quad() -> [PositionVertex; 4] {
    QUAD_CORNERS.map(|[x, y, z, _, _]| PositionVertex {
        position: Vec3::new(x, y, z),
    })
}

pub fn textured_quad() -> [TexturedVertex; 4] {
    QUAD_CORNERS.map(|[x, y, z, u, v]| TexturedVertex {
        position: Vec3::new(x, y, z),
        tex_coords: Vec2::new(u, v),
    })
}

/// Position and texture coordinates of a 2x2x2 cube, six vertices per face.
#[rustfmt::skip]
const CUBE: [[f32; 5]; 36] = [
    // front face
    [-1.0,  1.0,  1.0, 0.0, 1.0],
    [ 1.0, -1.0,  1.0, 1.0, 0.0],
    [ 1.0,  1.0,  1.0, 1.0, 1.0],
    [-1.0,  1.0,  1.0, 0.0, 1.0],
    [-1.0, -1.0,  1.0, 0.0, 0.0],
    [ 1.0, -1.0,  1.0, 1.0, 0.0],
    // back face
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
    [ 1.0,  1.0, -1.0, 1.0, 1.0],
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
    // left face
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0,  1.0, 1.0, 0.0],
    [-1.0,  1.0,  1.0, 1.0, 1.0],
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [-1.0, -1.0,  1.0, 1.0, 0.0],
    // right face
    [ 1.0,  1.0,  1.0, 0.0, 1.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
    [ 1.0,  1.0, -1.0, 1.0, 1.0],
    [ 1.0,  1.0,  1.0, 0.0, 1.0],
    [ 1.0, -1.0,  1.0, 0.0, 0.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
    // top face
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [ 1.0,  1.0,  1.0, 1.0, 0.0],
    [ 1.0,  1.0, -1.0, 1.0, 1.0],
    [-1.0,  1.0, -1.0, 0.0, 1.0],
    [-1.0,  1.0,  1.0, 0.0, 0.0],
    [ 1.0,  1.0,  1.0, 1.0, 0.0],
    // bottom face
    [-1.0, -1.0,  1.0, 0.0, 1.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
    [ 1.0, -1.0,  1.0, 1.0, 1.0],
    [-1.0, -1.0,  1.0, 0.0, 1.0],
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [ 1.0, -1.0, -1.0, 1.0, 0.0],
];

pub fn textured_cube() -> [TexturedVertex; 36] {
    CUBE.map(|[x, y, z, u, v]| TexturedVertex {
        position: Vec3::new(x, y, z),
        tex_coords: Vec2::new(u, v),
    })
}

/// The skybox cube, wound so its inside faces the camera.
pub fn skybox_cube() -> [PositionVertex; 36] {
    #[rustfmt::skip]
    const FACES: [[f32; 3]; 36] = [
        [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
        [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],

        [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
        [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],

        [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0],
        [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],

        [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0],
        [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],

        [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
        [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],

        [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
        [ 1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
    ];
    FACES.map(|[x, y, z]| PositionVertex {
        position: Vec3::new(x, y, z),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_stay_in_range() {
        let quad = quad();
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < quad.len()));
    }

    #[test]
    fn cube_faces_lie_on_the_unit_box() {
        for chunk in textured_cube().chunks(6) {
            // Each face keeps one coordinate fixed at +-1 across its six vertices.
            let fixed_axis = (0..3).find(|&axis| {
                chunk
                    .iter()
                    .all(|v| v.position[axis] == chunk[0].position[axis])
            });
            assert!(fixed_axis.is_some());
            let axis = fixed_axis.unwrap();
            assert_eq!(chunk[0].position[axis].abs(), 1.0);
        }
    }

    #[test]
    fn skybox_covers_every_side() {
        let cube = skybox_cube();
        for axis in 0..3 {
            assert!(cube.iter().any(|v| v.position[axis] == 1.0));
            assert!(cube.iter().any(|v| v.position[axis] == -1.0));
        }
    }
}
