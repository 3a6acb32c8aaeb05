//! First-person fly camera and perspective projection

use ridge_core::config::{CameraConfig, ProjectionConfig};
use ridge_core::{mat4_mul, Mat4, Vec3};

/// Pitch is held inside +/- this many degrees so `forward` never lines up with `world_up`
pub const PITCH_LIMIT: f32 = 89.0;

/// A free-flying camera steered by yaw/pitch angles in degrees.
///
/// Yaw starts at -90 so the initial `forward` is -Z.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    /// Horizontal angle in degrees
    yaw: f32,
    /// Vertical angle in degrees, clamped to [-PITCH_LIMIT, PITCH_LIMIT]
    pitch: f32,
    forward: Vec3,
    world_up: Vec3,
    /// Units per second
    move_speed: f32,
    /// Degrees per pointer pixel
    mouse_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(position: Vec3, move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            forward: Vec3::FORWARD,
            world_up: Vec3::UP,
            move_speed,
            mouse_sensitivity,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            Vec3::from_array(config.start_position),
            config.move_speed,
            config.mouse_sensitivity,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn speed(&self) -> f32 {
        self.move_speed
    }

    /// Horizontal right vector, unit length at any pitch
    pub fn right(&self) -> Vec3 {
        // Left un-normalized, strafing would slow down as pitch steepens
        self.forward.cross(&self.world_up).normalized()
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.forward * (self.move_speed * dt);
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.position -= self.forward * (self.move_speed * dt);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.position += self.right() * (self.move_speed * dt);
    }

    pub fn move_left(&mut self, dt: f32) {
        self.position -= self.right() * (self.move_speed * dt);
    }

    pub fn move_up(&mut self, dt: f32) {
        self.position += self.world_up * (self.move_speed * dt);
    }

    pub fn move_down(&mut self, dt: f32) {
        self.position -= self.world_up * (self.move_speed * dt);
    }

    /// Replace the movement speed (sprint on/off)
    pub fn set_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    /// Turn by pointer deltas in pixels. `dy` is positive for "look up".
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
    }

    /// Get the view matrix (4x4, column-major), looking from `position` along `forward`
    pub fn view_matrix(&self) -> Mat4 {
        let f = self.forward;
        let s = f.cross(&self.world_up).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn from_config(config: &ProjectionConfig, aspect: f32) -> Self {
        Self {
            fov_deg: config.fov_deg,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Right-handed perspective matrix mapping view depth to wgpu's [0, 1] range
    pub fn matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov_deg.to_radians() / 2.0).tan();
        let range = self.near - self.far;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, self.far / range, -1.0],
            [0.0, 0.0, self.near * self.far / range, 0.0],
        ]
    }

    /// Combined view-projection for a camera
    pub fn view_projection(&self, camera: &FlyCamera) -> Mat4 {
        mat4_mul(&self.matrix(), &camera.view_matrix())
    }
}
