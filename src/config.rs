//! Render and terrain configuration.
//!
//! Loaded from JSON strings; reading the file is left to the caller.

use crate::error::RenderError;
use crate::math::DVec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Camera rotation per frame while a rotation key is held (radians).
pub const ROTATION_SPEED: f64 = 0.03;
/// Camera translation per frame while a movement key is held (world units).
pub const MOVE_SPEED: f64 = 0.2;
/// Pitch limit applied by the camera controller (degrees).
pub const PITCH_LIMIT_DEGREES: f64 = 85.0;
/// Field of view used when none is configured (degrees).
pub const DEFAULT_FOV_DEGREES: f64 = 90.0;

/// Root configuration for a renderable scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: usize,
    /// Output image height in pixels.
    pub height: usize,
    /// Clear color, linear 0..1 RGB.
    pub background: [f64; 3],
    pub camera: CameraConfig,
    /// Terrain streaming; `None` renders only explicit models.
    pub chunker: Option<ChunkerConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            background: [1.0, 1.0, 1.0],
            camera: CameraConfig::default(),
            chunker: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f64,
    pub position: [f64; 3],
    /// Radians.
    pub yaw: f64,
    /// Radians.
    pub pitch: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            position: [0.0, 0.0, 0.0],
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Terrain chunk streaming parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Grid points per chunk edge.
    pub resolution: usize,
    /// World units per chunk edge.
    pub chunk_size: f64,
    /// Cached chunks farther than this (in chunks, Chebyshev) are evicted.
    pub retain_radius: i64,
    /// Noise seed.
    pub seed: u32,
    /// Translation applied to every chunk model.
    pub offset: [f64; 3],
    /// Direction to the light for the terrain shader, expected normalized.
    pub light_direction: [f64; 3],
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            resolution: 30,
            chunk_size: 20.0,
            retain_radius: 4,
            seed: 42,
            offset: [0.0, 0.0, 10.0],
            light_direction: [0.0, 1.0, 0.0],
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, RenderError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot render with.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(invalid(format!("fov must be within (0, 180) degrees, got {fov}")));
        }

        if let Some(chunker) = &self.chunker {
            chunker.validate()?;
        }

        Ok(())
    }

    pub fn background_color(&self) -> DVec3 {
        DVec3::from_array(self.background)
    }
}

impl ChunkerConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.resolution < 2 {
            return Err(invalid(format!(
                "terrain resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        if !(self.chunk_size > 0.0) {
            return Err(invalid(format!(
                "chunk size must be positive, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> RenderError {
    warn!(%message, "Rejected configuration");
    RenderError::InvalidConfig(message)
}
