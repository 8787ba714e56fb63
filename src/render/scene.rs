//! Fixed scene layouts shared by the tutorial programs.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    assets::Assets,
    render::primitives,
};

/// Where to find a model and where to put it.
#[derive(Debug, Clone, Copy)]
pub struct ModelDesc {
    pub name: &'static str,
    pub mesh: &'static str,
    pub texture: &'static str,
    pub position: Vec3,
    pub scale: Vec3,
}

impl ModelDesc {
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.position, self.scale)
    }
}

/// Translation applied after scaling.
pub fn model_matrix(position: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_scale(scale)
}

/// The four textured models of the object tutorial.
pub const OBJECT_SCENE: [ModelDesc; 4] = [
    ModelDesc {
        name: "crate1",
        mesh: "crate.obj",
        texture: "crate.jpg",
        position: Vec3::new(-2.5, 1.0, 0.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "crate2",
        mesh: "woodcrate.obj",
        texture: "woodcrate_diffuse.jpg",
        position: Vec3::new(2.5, 1.0, 0.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "robot",
        mesh: "robot.obj",
        texture: "robot_diffuse.jpg",
        position: Vec3::new(0.0, 0.0, -2.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "floor",
        mesh: "floor.obj",
        texture: "tile_floor.jpg",
        position: Vec3::ZERO,
        scale: Vec3::new(10.0, 1.0, 10.0),
    },
];

/// The six models lit in the lighting, shadow and UI tutorials.
pub const SHOWROOM: [ModelDesc; 6] = [
    ModelDesc {
        name: "crate1",
        mesh: "crate.obj",
        texture: "crate.jpg",
        position: Vec3::new(-3.5, 0.0, 0.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "crate2",
        mesh: "woodcrate.obj",
        texture: "woodcrate_diffuse.jpg",
        position: Vec3::new(3.5, 0.0, 0.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "robot",
        mesh: "robot.obj",
        texture: "robot_diffuse.jpg",
        position: Vec3::new(0.0, 0.0, -2.0),
        scale: Vec3::ONE,
    },
    ModelDesc {
        name: "floor",
        mesh: "floor.obj",
        texture: "tile_floor.jpg",
        position: Vec3::ZERO,
        scale: Vec3::new(10.0, 1.0, 10.0),
    },
    ModelDesc {
        name: "pin",
        mesh: "bowling_pin.obj",
        texture: "AMF.tga",
        position: Vec3::new(0.0, 0.0, 2.0),
        scale: Vec3::splat(0.1),
    },
    ModelDesc {
        name: "bunny",
        mesh: "bunny.obj",
        texture: "bunny_diffuse.jpg",
        position: Vec3::new(-2.0, 0.0, 2.0),
        scale: Vec3::splat(0.7),
    },
];

/// A loaded model. A model whose OBJ failed to load has no mesh and draws nothing.
pub struct SceneObject {
    pub desc: ModelDesc,
    pub mesh: Option<Mesh>,
    pub texture: Texture,
}

impl SceneObject {
    pub fn model_matrix(&self) -> Mat4 {
        self.desc.model_matrix()
    }

    /// Sets `model`, binds the diffuse texture on unit 0 and draws.
    pub fn draw(&self, shader: &ShaderProgram) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        shader.set_uniform("model", self.model_matrix());
        self.texture.bind(0);
        mesh.draw();
        self.texture.unbind(0);
    }

    /// Sets `model` and draws without touching textures, for depth-only passes.
    pub fn draw_depth(&self, shader: &ShaderProgram) {
        if let Some(mesh) = &self.mesh {
            shader.set_uniform("model", self.model_matrix());
            mesh.draw();
        }
    }
}

/// Loads every model in `descs` from the asset `models/` and `textures/`
/// directories. Missing files are logged, not fatal.
pub fn load_scene(
    gl: &Arc<glow::Context>,
    assets: &Assets,
    descs: &[ModelDesc],
) -> anyhow::Result<Vec<SceneObject>> {
    let mut objects = Vec::with_capacity(descs.len());
    for desc in descs {
        let mesh = match Mesh::load_obj(gl, assets.model(desc.mesh)) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                log::warn!("Model '{}' will not be drawn: {e:#}", desc.name);
                None
            }
        };
        let texture = Texture::load_or_checkerboard(gl, assets.texture(desc.texture), true)?;
        objects.push(SceneObject {
            desc: *desc,
            mesh,
            texture,
        });
    }
    let loaded: Vec<&Mesh> = objects.iter().filter_map(|o| o.mesh.as_ref()).collect();
    log::info!(
        "Scene ready: {}/{} models loaded, {} vertices",
        loaded.len(),
        objects.len(),
        loaded.iter().map(|mesh| mesh.vertex_count()).sum::<usize>()
    );
    Ok(objects)
}

pub const CUBE_POSITION: Vec3 = Vec3::ZERO;
pub const FLOOR_POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
/// The floor is the cube squashed into a thin slab.
pub const FLOOR_SCALE: Vec3 = Vec3::new(10.0, 0.01, 10.0);

/// A textured crate standing on a grid floor, drawn with the `camera` shader.
pub struct CubeOnFloor {
    cube: Mesh,
    crate_texture: Texture,
    floor_texture: Texture,
}

impl CubeOnFloor {
    pub fn load(gl: &Arc<glow::Context>, assets: &Assets) -> anyhow::Result<Self> {
        Ok(Self {
            cube: Mesh::new_arrays(gl, &primitives::textured_cube(), glow::TRIANGLES)?,
            crate_texture: Texture::load_or_checkerboard(gl, assets.texture("crate.jpg"), true)?,
            floor_texture: Texture::load_or_checkerboard(gl, assets.texture("grid.jpg"), true)?,
        })
    }

    /// Draws both objects. The shader must be in use with `view` and
    /// `projection` already set.
    pub fn draw(&self, shader: &ShaderProgram) {
        shader.set_sampler("texSampler1", 0);

        shader.set_uniform("model", Mat4::from_translation(CUBE_POSITION));
        self.crate_texture.bind(0);
        self.cube.draw();

        shader.set_uniform("model", model_matrix(FLOOR_POSITION, FLOOR_SCALE));
        self.floor_texture.bind(0);
        self.cube.draw();
        self.floor_texture.unbind(0);
    }
}

/// Small unlit mesh marking where the light is.
pub struct Bulb {
    mesh: Option<Mesh>,
    pub color: Vec3,
}

impl Bulb {
    pub fn load(gl: &Arc<glow::Context>, assets: &Assets) -> Self {
        let mesh = Mesh::load_obj(gl, assets.model("light.obj"))
            .inspect_err(|e| log::warn!("Light bulb will not be drawn: {e:#}"))
            .ok();
        Self {
            mesh,
            color: Vec3::ONE,
        }
    }

    /// Draws the bulb at `position` with the `bulb` shader.
    pub fn draw(&self, shader: &ShaderProgram, position: Vec3, view: Mat4, projection: Mat4) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        shader.use_program();
        shader.set_uniform("lightColor", self.color);
        shader.set_uniform("model", Mat4::from_translation(position));
        shader.set_uniform("view", view);
        shader.set_uniform("projection", projection);
        mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_applied_before_translation() {
        let m = model_matrix(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
        let p = m.transform_point3(Vec3::ONE);
        assert_eq!(p, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn floor_is_flattened_to_a_wide_plane() {
        let floor = SHOWROOM.iter().find(|d| d.name == "floor").unwrap();
        let corner = floor.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(corner, Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn showroom_names_are_unique() {
        for (i, a) in SHOWROOM.iter().enumerate() {
            for b in &SHOWROOM[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
