/// Camera and per-frame input handling.
/// The camera is just a field of view plus a transform; projection lives in
/// the rasterizer so the camera can stay a plain value.
pub mod transform;

pub use transform::{Basis, Transform};

use crate::config::{CameraConfig, MOVE_SPEED, PITCH_LIMIT_DEGREES, ROTATION_SPEED};
use crate::math::{clamp, DVec3};

#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f64,
    pub transform: Transform,
}

impl Camera {
    pub fn new(position: DVec3, fov: f64) -> Self {
        Self {
            fov,
            transform: Transform::new(position),
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            DVec3::from_array(config.position),
            config.fov_degrees.to_radians(),
        );
        camera.transform.set_rotation(config.yaw, config.pitch);
        camera
    }

    #[inline]
    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    /// Half-height of the view plane at unit depth.
    #[inline]
    pub fn view_plane_half_height(&self) -> f64 {
        (self.fov / 2.0).tan()
    }

    /// Turn by the given angle deltas, keeping pitch inside the limit.
    pub fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
        let limit = PITCH_LIMIT_DEGREES.to_radians();
        let pitch = clamp(self.transform.pitch() + delta_pitch, -limit, limit);
        let yaw = self.transform.yaw() + delta_yaw;
        self.transform.set_rotation(yaw, pitch);
    }

    /// Move along the camera's own forward / right axes and the world up axis.
    pub fn move_local(&mut self, forward: f64, right: f64, up: f64) {
        let delta = self.transform.forward() * forward
            + self.transform.right() * right
            + DVec3::Y * up;
        self.transform.position += delta;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Key state sampled once per frame by the presentation layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraController {
    pub forward_pressed: bool,
    pub backward_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub pitch_up_pressed: bool,
    pub pitch_down_pressed: bool,
    pub yaw_left_pressed: bool,
    pub yaw_right_pressed: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame worth of input to the camera.
    pub fn update_camera(&self, camera: &mut Camera) {
        let mut delta_pitch = 0.0;
        let mut delta_yaw = 0.0;

        if self.pitch_up_pressed {
            delta_pitch += ROTATION_SPEED;
        }
        if self.pitch_down_pressed {
            delta_pitch -= ROTATION_SPEED;
        }
        if self.yaw_left_pressed {
            delta_yaw += ROTATION_SPEED;
        }
        if self.yaw_right_pressed {
            delta_yaw -= ROTATION_SPEED;
        }

        if delta_pitch != 0.0 || delta_yaw != 0.0 {
            camera.rotate(delta_yaw, delta_pitch);
        }

        let mut forward = 0.0;
        let mut right = 0.0;
        let mut up = 0.0;

        if self.forward_pressed {
            forward += MOVE_SPEED;
        }
        if self.backward_pressed {
            forward -= MOVE_SPEED;
        }
        if self.right_pressed {
            right += MOVE_SPEED;
        }
        if self.left_pressed {
            right -= MOVE_SPEED;
        }
        if self.up_pressed {
            up += MOVE_SPEED;
        }
        if self.down_pressed {
            up -= MOVE_SPEED;
        }

        camera.move_local(forward, right, up);
    }
}
