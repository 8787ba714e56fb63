//! Light and material parameters, and the light-space projection used for
//! shadow mapping.

use glam::{Mat4, Vec3};

use crate::abs::ShaderProgram;

/// A light that slides back and forth along the x axis.
#[derive(Debug, Clone, Copy)]
pub struct OrbitingLight {
    /// Resting position. Only `y` and `z` survive; `x` is driven by the angle.
    pub base: Vec3,
    /// Swing amplitude along x.
    pub radius: f32,
    /// Degrees per second.
    pub speed: f32,
    angle: f32,
}

impl OrbitingLight {
    pub fn new(base: Vec3) -> Self {
        Self {
            base,
            radius: 8.0,
            speed: 50.0,
            angle: 0.0,
        }
    }

    /// Advances the swing by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + dt * self.speed) % 360.0;
    }

    /// Current angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.to_radians().sin(),
            self.base.y,
            self.base.z,
        )
    }
}

/// Phong light terms, uploaded as the `light` struct uniform.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl PointLight {
    /// A white light with a dim ambient term.
    pub fn white(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }

    pub fn apply(&self, shader: &ShaderProgram) {
        shader.set_uniform("light.position", self.position);
        shader.set_uniform("light.ambient", self.ambient);
        shader.set_uniform("light.diffuse", self.diffuse);
        shader.set_uniform("light.specular", self.specular);
    }
}

/// Surface response, uploaded as the `material` struct uniform. The diffuse
/// colour comes from the texture bound on [`Material::DIFFUSE_UNIT`].
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const DIFFUSE_UNIT: u32 = 0;

    pub fn apply(&self, shader: &ShaderProgram) {
        shader.set_uniform("material.ambient", self.ambient);
        shader.set_sampler("material.diffuseMap", Self::DIFFUSE_UNIT);
        shader.set_uniform("material.specular", self.specular);
        shader.set_uniform("material.shininess", self.shininess);
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.1),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

/// Orthographic box the shadow-casting light looks through.
#[derive(Debug, Clone, Copy)]
pub struct ShadowProjection {
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowProjection {
    fn default() -> Self {
        Self {
            half_extent: 10.0,
            near: 1.0,
            far: 30.0,
        }
    }
}

impl ShadowProjection {
    /// Projection times view for a light at `light_pos` aimed at the origin.
    pub fn light_space_matrix(&self, light_pos: Vec3) -> Mat4 {
        let e = self.half_extent;
        let projection = Mat4::orthographic_rh_gl(-e, e, -e, e, self.near, self.far);
        let view = Mat4::look_at_rh(light_pos, Vec3::ZERO, Vec3::Y);
        projection * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_swings_along_x() {
        let mut light = OrbitingLight::new(Vec3::new(0.0, 1.0, 10.0));
        assert_eq!(light.position(), Vec3::new(0.0, 1.0, 10.0));

        // 50 degrees per second, so 1.8 s reaches 90 degrees.
        light.advance(1.8);
        let pos = light.position();
        assert!((pos.x - 8.0).abs() < 1e-4);
        assert_eq!(pos.y, 1.0);
        assert_eq!(pos.z, 10.0);
    }

    #[test]
    fn light_angle_wraps() {
        let mut light = OrbitingLight::new(Vec3::ZERO);
        light.advance(10.0);
        assert!((light.angle() - 140.0).abs() < 1e-3);
    }

    #[test]
    fn origin_lands_in_the_middle_of_the_shadow_map() {
        let light_pos = Vec3::new(3.0, 5.0, 10.0);
        let m = ShadowProjection::default().light_space_matrix(light_pos);
        let clip = m.project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        // Inside the near/far range.
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }

    #[test]
    fn points_behind_the_far_plane_are_clipped() {
        let light_pos = Vec3::new(0.0, 0.0, 10.0);
        let m = ShadowProjection::default().light_space_matrix(light_pos);
        // 35 units from the light, beyond far = 30.
        let clip = m.project_point3(Vec3::new(0.0, 0.0, -25.0));
        assert!(clip.z > 1.0);
    }
}
