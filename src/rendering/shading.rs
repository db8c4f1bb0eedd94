/// Per-pixel color functions.
/// Kept separate from the rasterizer so lighting models
/// can evolve independently of the rasterization pipeline.
use super::texture::Texture;
use crate::error::RenderError;
use crate::math::{lerp, DVec2, DVec3};
use std::fmt::Debug;
use std::sync::Arc;

/// Perspective-correct attributes at one covered pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment {
    pub tex_coord: DVec2,
    /// Interpolated, not renormalized.
    pub normal: DVec3,
    /// View-space depth.
    pub depth: f64,
    pub aux: f64,
}

/// Anything that can color a fragment.
pub trait Shader: Debug + Send + Sync {
    fn pixel_color(&self, fragment: &Fragment) -> DVec3;
}

/// Shaders are shared between models (every terrain chunk uses the same one).
pub type SharedShader = Arc<dyn Shader>;

/// `(n . l + 1) / 2`. The normal is normalized here, the light direction is not.
#[inline]
pub fn half_lambert(normal: DVec3, direction_to_light: DVec3) -> f64 {
    (normal.normalize_or_zero().dot(direction_to_light) + 1.0) * 0.5
}

/// Constant, unlit color.
#[derive(Debug, Clone, Copy)]
pub struct FlatShader {
    pub color: DVec3,
}

impl FlatShader {
    pub fn new(color: DVec3) -> Self {
        Self { color }
    }
}

impl Shader for FlatShader {
    fn pixel_color(&self, _fragment: &Fragment) -> DVec3 {
        self.color
    }
}

/// Nearest-neighbour texture lookup, no lighting.
#[derive(Debug, Clone)]
pub struct TextureShader {
    pub texture: Arc<Texture>,
}

impl TextureShader {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }
}

impl Shader for TextureShader {
    fn pixel_color(&self, fragment: &Fragment) -> DVec3 {
        self.texture.sample(fragment.tex_coord)
    }
}

/// Flat color with half-Lambert lighting.
#[derive(Debug, Clone, Copy)]
pub struct LitShader {
    pub color: DVec3,
    pub direction_to_light: DVec3,
}

impl LitShader {
    pub fn new(color: DVec3, direction_to_light: DVec3) -> Self {
        Self {
            color,
            direction_to_light,
        }
    }
}

impl Shader for LitShader {
    fn pixel_color(&self, fragment: &Fragment) -> DVec3 {
        self.color * half_lambert(fragment.normal, self.direction_to_light)
    }
}

/// Texture sample with half-Lambert lighting.
#[derive(Debug, Clone)]
pub struct LitTextureShader {
    pub texture: Arc<Texture>,
    pub direction_to_light: DVec3,
}

impl LitTextureShader {
    pub fn new(texture: Arc<Texture>, direction_to_light: DVec3) -> Self {
        Self {
            texture,
            direction_to_light,
        }
    }
}

impl Shader for LitTextureShader {
    fn pixel_color(&self, fragment: &Fragment) -> DVec3 {
        self.texture.sample(fragment.tex_coord)
            * half_lambert(fragment.normal, self.direction_to_light)
    }
}

pub const DEFAULT_BAND_HEIGHTS: [f64; 3] = [0.0, 1.5, 6.0];

pub const DEFAULT_BAND_COLORS: [DVec3; 4] = [
    DVec3::new(0.2, 0.6, 0.98),   // water
    DVec3::new(0.2, 0.6, 0.1),    // grass
    DVec3::new(0.5, 0.35, 0.3),   // mountain
    DVec3::new(0.93, 0.93, 0.91), // snow
];

/// Distance where fog starts.
pub const FOG_NEAR: f64 = 25.0;
/// Distance where fog fully hides the terrain.
pub const FOG_FAR: f64 = 40.0;

/// Height-banded, lit, fogged terrain.
///
/// Reads the band height from the fragment's `aux` slot.
#[derive(Debug, Clone)]
pub struct TerrainShader {
    pub direction_to_light: DVec3,
    /// Fog target; should match the scene background.
    pub background: DVec3,
    heights: Vec<f64>,
    colors: Vec<DVec3>,
}

impl TerrainShader {
    pub fn new(direction_to_light: DVec3, background: DVec3) -> Self {
        Self {
            direction_to_light,
            background,
            heights: DEFAULT_BAND_HEIGHTS.to_vec(),
            colors: DEFAULT_BAND_COLORS.to_vec(),
        }
    }

    /// Custom bands. `colors` needs exactly one more entry than `heights`.
    pub fn with_bands(
        mut self,
        heights: Vec<f64>,
        colors: Vec<DVec3>,
    ) -> Result<Self, RenderError> {
        if colors.len() != heights.len() + 1 {
            return Err(RenderError::InvalidConfig(format!(
                "{} band heights need {} colors, got {}",
                heights.len(),
                heights.len() + 1,
                colors.len()
            )));
        }
        self.heights = heights;
        self.colors = colors;
        Ok(self)
    }

    /// Color of the band `height` falls in.
    pub fn band_color(&self, height: f64) -> DVec3 {
        let band = self
            .heights
            .iter()
            .take_while(|&&threshold| height > threshold)
            .count();
        self.colors[band]
    }

    /// 0 up to `FOG_NEAR`, 1 from `FOG_FAR`, linear in between.
    pub fn fog_amount(depth: f64) -> f64 {
        if depth <= FOG_NEAR {
            0.0
        } else if depth >= FOG_FAR {
            1.0
        } else {
            (depth - FOG_NEAR) / (FOG_FAR - FOG_NEAR)
        }
    }
}

impl Shader for TerrainShader {
    fn pixel_color(&self, fragment: &Fragment) -> DVec3 {
        let light = half_lambert(fragment.normal, self.direction_to_light);
        let lit = self.band_color(fragment.aux) * light;
        lerp(lit, self.background, Self::fog_amount(fragment.depth))
    }
}
