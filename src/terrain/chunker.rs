/// Streams terrain chunks around the camera.
///
/// Chunks are generated lazily, cached by grid coordinate and shared with the
/// active list through `Arc`, so a cache hit never rebuilds geometry.
use super::generator::TerrainGenerator;
use crate::config::ChunkerConfig;
use crate::count_add;
use crate::error::RenderError;
use crate::math::{DVec3, I64Vec2};
use crate::meshing::Model;
#[cfg(feature = "profiling")]
use crate::perf::RENDER_COUNTERS;
use crate::rendering::{SharedShader, TerrainShader};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Half-width of the active window: 5x5 chunks around the camera.
pub const ACTIVE_RADIUS: i64 = 2;
/// Smallest allowed retention radius; keeps a ring of cached chunks beyond
/// the active window.
pub const MIN_RETAIN_RADIUS: i64 = ACTIVE_RADIUS + 1;
/// Chunk coordinates are clamped to this magnitude. Past 2^53 an f64 world
/// position no longer resolves single chunks anyway.
pub const MAX_CHUNK_COORD: i64 = 1 << 53;

pub struct Chunker {
    generator: TerrainGenerator,
    shader: SharedShader,
    config: ChunkerConfig,
    offset: DVec3,
    chunks: HashMap<I64Vec2, Arc<Model>>,
    active: Vec<Arc<Model>>,
    camera_chunk: Option<I64Vec2>,
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("generator", &self.generator)
            .field("config", &self.config)
            .field("cached", &self.chunks.len())
            .field("active", &self.active.len())
            .field("camera_chunk", &self.camera_chunk)
            .finish()
    }
}

impl Chunker {
    /// Chunker drawing every chunk with `shader`.
    pub fn new(config: ChunkerConfig, shader: SharedShader) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            generator: TerrainGenerator::new(config.seed),
            shader,
            offset: DVec3::from_array(config.offset),
            config,
            chunks: HashMap::new(),
            active: Vec::new(),
            camera_chunk: None,
        })
    }

    /// Chunker with the default terrain shader, fogging towards `background`.
    pub fn from_config(config: ChunkerConfig, background: DVec3) -> Result<Self, RenderError> {
        let light = DVec3::from_array(config.light_direction);
        let shader: SharedShader = Arc::new(TerrainShader::new(light, background));
        Self::new(config, shader)
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Chunk grid coordinate containing a world position (XZ, rounded).
    ///
    /// Non-finite positions map to chunk 0 on that axis.
    #[inline]
    pub fn world_to_chunk(&self, position: DVec3) -> I64Vec2 {
        let size = self.config.chunk_size;
        I64Vec2::new(axis_to_chunk(position.x / size), axis_to_chunk(position.z / size))
    }

    /// Cached chunk at `coord`, generated on first request.
    pub fn chunk(&mut self, coord: I64Vec2) -> Arc<Model> {
        let Self {
            generator,
            shader,
            config,
            offset,
            chunks,
            ..
        } = self;

        chunks
            .entry(coord)
            .or_insert_with(|| {
                Arc::new(generator.build_chunk(
                    coord,
                    config.resolution,
                    config.chunk_size,
                    *offset,
                    shader.clone(),
                ))
            })
            .clone()
    }

    /// Recompute the active window around the camera and evict cached chunks
    /// that fell out of the retention radius.
    ///
    /// Window order is row by row in Z, X inner.
    pub fn update(&mut self, camera_position: DVec3) -> &[Arc<Model>] {
        let center = self.world_to_chunk(camera_position);
        if self.camera_chunk != Some(center) {
            debug!(chunk_x = center.x, chunk_z = center.y, "camera entered chunk");
        }
        self.camera_chunk = Some(center);

        self.active.clear();
        for z in center.y - ACTIVE_RADIUS..=center.y + ACTIVE_RADIUS {
            for x in center.x - ACTIVE_RADIUS..=center.x + ACTIVE_RADIUS {
                let chunk = self.chunk(I64Vec2::new(x, z));
                self.active.push(chunk);
            }
        }

        self.evict_outside(center);
        &self.active
    }

    fn evict_outside(&mut self, center: I64Vec2) {
        let radius = self.retain_radius();
        let before = self.chunks.len();
        self.chunks
            .retain(|&coord, _| chebyshev_distance(coord, center) <= radius.unsigned_abs());

        let evicted = before - self.chunks.len();
        if evicted > 0 {
            count_add!(RENDER_COUNTERS.chunks_evicted, evicted as u64);
            debug!(evicted, cached = self.chunks.len(), "evicted terrain chunks");
        }
    }

    /// Effective retention radius in chunks.
    pub fn retain_radius(&self) -> i64 {
        self.config.retain_radius.max(MIN_RETAIN_RADIUS)
    }

    /// Chunks to draw this frame, in window order.
    pub fn active(&self) -> &[Arc<Model>] {
        &self.active
    }

    pub fn contains_chunk(&self, coord: I64Vec2) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn cached_count(&self) -> usize {
        self.chunks.len()
    }

    /// Chunk the camera was in at the last `update`.
    pub fn camera_chunk(&self) -> Option<I64Vec2> {
        self.camera_chunk
    }

    /// Drop every cached and active chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.active.clear();
        self.camera_chunk = None;
    }
}

fn axis_to_chunk(scaled: f64) -> i64 {
    if scaled.is_finite() {
        scaled.round().clamp(-MAX_CHUNK_COORD as f64, MAX_CHUNK_COORD as f64) as i64
    } else {
        0
    }
}

/// Exact for any pair of coordinates, including ones handed to `chunk` directly.
fn chebyshev_distance(a: I64Vec2, b: I64Vec2) -> u64 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}
