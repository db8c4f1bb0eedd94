/// Color + depth render target.
///
/// Color is linear 0..1 RGB, depth is view-space distance with `+inf`
/// meaning "nothing drawn". Both buffers are row-major, row 0 first.
use crate::count_call;
use crate::math::{to_argb, DVec3};
#[cfg(feature = "profiling")]
use crate::perf::RENDER_COUNTERS;

#[derive(Debug, Clone)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    color: Vec<DVec3>,
    depth: Vec<f64>,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_count = width * height;
        Self {
            width,
            height,
            color: vec![DVec3::ZERO; pixel_count],
            depth: vec![f64::INFINITY; pixel_count],
        }
    }

    /// Reset color to `background` and depth to `+inf`.
    pub fn clear(&mut self, background: DVec3) {
        count_call!(RENDER_COUNTERS.image_clears);
        self.color.fill(background);
        self.depth.fill(f64::INFINITY);
    }

    /// Reallocate for a new output resolution. Contents are undefined until
    /// the next `clear`.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let pixel_count = width * height;
        self.color.resize(pixel_count, DVec3::ZERO);
        self.depth.resize(pixel_count, f64::INFINITY);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test at `(x, y)`. On pass the depth is stored and the linear
    /// index is returned so the caller can write the matching color.
    #[inline]
    pub fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: f64) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.index(x, y);
        if depth < self.depth[index] {
            self.depth[index] = depth;
            Some(index)
        } else {
            None
        }
    }

    #[inline]
    pub fn write_color(&mut self, index: usize, color: DVec3) {
        self.color[index] = color;
    }

    /// Depth-tested write of a single pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: DVec3, depth: f64) -> bool {
        match self.test_depth_and_get_index(x, y, depth) {
            Some(index) => {
                self.color[index] = color;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> DVec3 {
        self.color[self.index(x, y)]
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f64 {
        self.depth[self.index(x, y)]
    }

    pub fn color_buffer(&self) -> &[DVec3] {
        &self.color
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth
    }

    /// Pack into 32-bit ARGB for presentation. Rows are written bottom-up so
    /// that world +Y ends up at the top of the display.
    pub fn write_argb(&self, out: &mut [u32]) {
        debug_assert_eq!(out.len(), self.color.len());
        if self.width == 0 {
            return;
        }
        for (dst_row, src_row) in out
            .chunks_exact_mut(self.width)
            .zip(self.color.chunks_exact(self.width).rev())
        {
            for (dst, src) in dst_row.iter_mut().zip(src_row) {
                *dst = to_argb(*src);
            }
        }
    }
}
