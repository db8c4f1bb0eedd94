/// Texel grids sampled by the texture shaders.
use crate::error::RenderError;
use crate::math::{clamp, DVec2, DVec3};

/// Row-major grid of linear 0..1 RGB texels, as produced by an image decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<DVec3>,
}

impl Texture {
    pub fn new(width: usize, height: usize, texels: Vec<DVec3>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || texels.len() != width * height {
            return Err(RenderError::InvalidConfig(format!(
                "texture of {width}x{height} needs {} texels, got {}",
                width * height,
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// From tightly packed 8-bit RGB triples.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, RenderError> {
        let texels = bytes
            .chunks_exact(3)
            .map(|rgb| DVec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0)
            .collect();
        Self::new(width, height, texels)
    }

    /// 1x1 texture of a single color.
    pub fn solid(color: DVec3) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest texel to `coord`, which is clamped to `[0, 1]` first.
    #[inline]
    pub fn sample(&self, coord: DVec2) -> DVec3 {
        let u = clamp(coord.x, 0.0, 1.0);
        let v = clamp(coord.y, 0.0, 1.0);

        let x = ((u * self.width as f64) as usize).min(self.width - 1);
        let y = ((v * self.height as f64) as usize).min(self.height - 1);

        self.texels[y * self.width + x]
    }
}
