//! First-person camera and the keyboard/mouse controller driving it.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use sdl2::keyboard::Keycode;

use crate::other::UpdateContext;

pub const WORLD_UP: Vec3 = Vec3::Y;
pub const DEFAULT_FOV: f32 = 45.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 120.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Keeps the look vector away from the poles, where `look x up` degenerates.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;

/// A yaw/pitch camera that moves freely in space.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    look: Vec3,
    right: Vec3,
    up: Vec3,
    /// Radians.
    yaw: f32,
    /// Radians.
    pitch: f32,
    /// Vertical field of view in degrees.
    fov: f32,
}

impl FpsCamera {
    /// A yaw of 0 looks down +Z, -180 down -Z. Positive pitch looks up.
    pub fn new(position: Vec3, yaw_deg: f32, pitch_deg: f32) -> Self {
        let mut camera = Self {
            position,
            look: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
            yaw: yaw_deg.to_radians(),
            pitch: pitch_deg.to_radians().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov: DEFAULT_FOV,
        };
        camera.update_vectors();
        camera
    }

    /// A camera at `position` aimed at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or(Vec3::NEG_Z);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        let yaw = dir.x.atan2(dir.z);
        Self::new(position, yaw.to_degrees(), pitch.to_degrees())
    }

    /// Turns the camera by the given angles in degrees.
    pub fn rotate(&mut self, yaw_deg: f32, pitch_deg: f32) {
        self.yaw += yaw_deg.to_radians();
        self.pitch = (self.pitch + pitch_deg.to_radians()).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Narrows or widens the field of view from a scroll amount.
    pub fn zoom(&mut self, scroll: f32, sensitivity: f32) {
        self.set_fov(self.fov + scroll * sensitivity);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(MIN_FOV, MAX_FOV);
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.look = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw).normalize();
        self.right = self.look.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.look).normalize();
    }
}

/// WASD + QE flying with mouse look and scroll zoom.
#[derive(Debug, Clone, Copy)]
pub struct FlyController {
    /// Units per second.
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll step.
    pub zoom_sensitivity: f32,
}

impl Default for FlyController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.1,
            zoom_sensitivity: -3.0,
        }
    }
}

impl FlyController {
    /// Applies mouse look, movement and zoom for one frame.
    pub fn update(&self, camera: &mut FpsCamera, ctx: &UpdateContext) {
        self.look(camera, ctx);
        self.fly(camera, ctx);
        self.zoom(camera, ctx);
    }

    /// Turns the camera by this frame's mouse motion.
    pub fn look(&self, camera: &mut FpsCamera, ctx: &UpdateContext) {
        let delta = ctx.mouse.delta;
        if delta != glam::Vec2::ZERO {
            camera.rotate(
                -delta.x * self.mouse_sensitivity,
                -delta.y * self.mouse_sensitivity,
            );
        }
    }

    /// Moves the camera by the held movement keys.
    pub fn fly(&self, camera: &mut FpsCamera, ctx: &UpdateContext) {
        let keys = &ctx.keyboard.down;
        let step = self.move_speed * ctx.delta_time;

        // Forward/backward
        if keys.contains(&Keycode::W) {
            camera.move_by(step * camera.look());
        } else if keys.contains(&Keycode::S) {
            camera.move_by(step * -camera.look());
        }

        // Strafe left/right
        if keys.contains(&Keycode::A) {
            camera.move_by(step * -camera.right());
        } else if keys.contains(&Keycode::D) {
            camera.move_by(step * camera.right());
        }

        // Up/down
        if keys.contains(&Keycode::Q) {
            camera.move_by(step * camera.up());
        } else if keys.contains(&Keycode::E) {
            camera.move_by(step * -camera.up());
        }
    }

    /// Zooms by this frame's vertical scroll.
    pub fn zoom(&self, camera: &mut FpsCamera, ctx: &UpdateContext) {
        let scroll = ctx.mouse.scroll_delta.y;
        if scroll != 0.0 {
            camera.zoom(scroll, self.zoom_sensitivity);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::other::{KeyboardState, MouseState};

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn yaw_of_minus_180_looks_down_negative_z() {
        let camera = FpsCamera::new(Vec3::new(0.0, 5.0, 20.0), -180.0, 0.0);
        assert!(approx(camera.look(), Vec3::NEG_Z));
        assert!(approx(camera.up(), Vec3::Y));
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = FpsCamera::new(Vec3::ZERO, 37.0, -10.0);
        assert!((camera.look().length() - 1.0).abs() < 1e-5);
        assert!(camera.look().dot(camera.right()).abs() < 1e-5);
        assert!(camera.look().dot(camera.up()).abs() < 1e-5);
        assert!(camera.right().dot(camera.up()).abs() < 1e-5);
        // Looking slightly down.
        assert!(camera.look().y < 0.0);
    }

    #[test]
    fn pitch_is_clamped_short_of_straight_up() {
        let mut camera = FpsCamera::new(Vec3::ZERO, 0.0, 0.0);
        camera.rotate(0.0, 500.0);
        assert!(camera.look().y < 1.0);
        assert!((camera.look().y - PITCH_LIMIT.sin()).abs() < 1e-5);
        assert!(camera.right().is_finite());
    }

    #[test]
    fn looking_at_faces_the_target() {
        let camera = FpsCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(approx(camera.look(), Vec3::NEG_Z));

        let camera = FpsCamera::looking_at(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
        assert!(approx(camera.look(), Vec3::X));
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let camera = FpsCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let p = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(approx(p, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = FpsCamera::new(Vec3::ZERO, 0.0, 0.0);
        camera.zoom(100.0, -3.0);
        assert_eq!(camera.fov(), MIN_FOV);
        camera.zoom(-100.0, -3.0);
        assert_eq!(camera.fov(), MAX_FOV);
        camera.set_fov(45.0);
        camera.zoom(1.0, -3.0);
        assert_eq!(camera.fov(), 42.0);
    }

    #[test]
    fn controller_flies_forward_and_prefers_w_over_s() {
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::W);
        keyboard.down.insert(Keycode::S);
        let mouse = MouseState::default();
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.5);

        let mut camera = FpsCamera::new(Vec3::ZERO, -180.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        // 5 units/s for half a second along -Z.
        assert!(approx(camera.position(), Vec3::new(0.0, 0.0, -2.5)));
    }

    #[test]
    fn controller_strafes_left_and_prefers_a_over_d() {
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::A);
        keyboard.down.insert(Keycode::D);
        let mouse = MouseState::default();
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.5);

        let mut camera = FpsCamera::new(Vec3::ZERO, -180.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        // Facing -Z, right is +X.
        assert!(approx(camera.position(), Vec3::new(-2.5, 0.0, 0.0)));
    }

    #[test]
    fn controller_rises_and_prefers_q_over_e() {
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::Q);
        keyboard.down.insert(Keycode::E);
        let mouse = MouseState::default();
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.5);

        let mut camera = FpsCamera::new(Vec3::ZERO, -180.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        assert!(approx(camera.position(), Vec3::new(0.0, 2.5, 0.0)));
    }

    #[test]
    fn controller_strafes_right_and_sinks() {
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::D);
        keyboard.down.insert(Keycode::E);
        let mouse = MouseState::default();
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.5);

        let mut camera = FpsCamera::new(Vec3::ZERO, -180.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        assert!(approx(camera.position(), Vec3::new(2.5, -2.5, 0.0)));
    }

    #[test]
    fn looking_at_an_off_axis_target_tilts_the_camera() {
        let camera = FpsCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        let expected = Vec3::new(1.0, 1.0, -4.0).normalize();
        assert!(approx(camera.look(), expected));
        assert!(camera.look().y > 0.2 && camera.look().z < -0.9);
    }

    #[test]
    fn controller_turns_against_mouse_motion() {
        let keyboard = KeyboardState::default();
        let mouse = MouseState {
            delta: Vec2::new(-900.0, 0.0),
            ..Default::default()
        };
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.016);

        let mut camera = FpsCamera::new(Vec3::ZERO, 0.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        // Moving the mouse left by 900 px at 0.1 deg/px adds 90 degrees of yaw.
        assert!(approx(camera.look(), Vec3::X));
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn controller_zooms_with_scroll() {
        let keyboard = KeyboardState::default();
        let mouse = MouseState {
            scroll_delta: Vec2::new(0.0, 2.0),
            ..Default::default()
        };
        let ctx = UpdateContext::new(&keyboard, &mouse, 0.016);

        let mut camera = FpsCamera::new(Vec3::ZERO, 0.0, 0.0);
        FlyController::default().update(&mut camera, &ctx);
        assert_eq!(camera.fov(), 39.0);
    }
}
