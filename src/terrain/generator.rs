/// Layered-noise heightfield and the chunk mesher built on top of it.
use crate::camera::Transform;
use crate::count_call;
use crate::math::{DVec2, DVec3, I64Vec2};
use crate::meshing::{Face, Model, Vertex};
#[cfg(feature = "profiling")]
use crate::perf::RENDER_COUNTERS;
use crate::rendering::SharedShader;
use noise::{NoiseFn, OpenSimplex};
use tracing::debug;

/// Noise octaves summed per elevation sample.
pub const ELEVATION_LAYERS: usize = 5;
/// Frequency of the first octave.
pub const BASE_FREQUENCY: f64 = 0.05;
/// Frequency multiplier per octave.
pub const LACUNARITY: f64 = 2.0;
/// Amplitude multiplier per octave.
pub const PERSISTENCE: f64 = 0.5;
/// Octaves from this index on use the ridged `0.5 - |n|` shape.
pub const RIDGE_LAYER_START: usize = 3;
pub const ELEVATION_SCALE: f64 = 10.0;
/// Added before flooring at zero; everything below becomes flat water.
pub const SEA_LEVEL_OFFSET: f64 = 1.8;
/// Max horizontal displacement of grid points, breaks up the regular grid.
pub const JIGGLE_STRENGTH: f64 = 0.05;
const JIGGLE_SAMPLE_OFFSET: f64 = 1000.0;

/// Square grid of world-space terrain points, row-major (row = Z step).
#[derive(Debug, Clone, PartialEq)]
pub struct PointMap {
    resolution: usize,
    points: Vec<DVec3>,
}

impl PointMap {
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> DVec3 {
        self.points[y * self.resolution + x]
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }
}

/// Owns the noise source, so separate generators never share state.
pub struct TerrainGenerator {
    seed: u32,
    noise: OpenSimplex,
}

impl std::fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("seed", &self.seed)
            .finish()
    }
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            noise: OpenSimplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw height at a world XZ position: fractal noise with ridged upper
    /// octaves, scaled. Not yet floored at sea level.
    pub fn elevation(&self, pos: DVec2) -> f64 {
        let mut frequency = BASE_FREQUENCY;
        let mut amplitude = 1.0;
        let mut elevation = 0.0;

        for layer in 0..ELEVATION_LAYERS {
            let mut n = self.noise.get([pos.x * frequency, pos.y * frequency]);
            if layer >= RIDGE_LAYER_START {
                n = 0.5 - n.abs();
            }
            elevation += n * amplitude;
            amplitude *= PERSISTENCE;
            frequency *= LACUNARITY;
        }

        elevation * ELEVATION_SCALE
    }

    /// Small deterministic offset of a grid position, sampled from
    /// decorrelated regions of the same noise.
    pub fn jiggle(&self, pos: DVec2) -> DVec2 {
        let dx = self.noise.get([pos.x + JIGGLE_SAMPLE_OFFSET, pos.y + JIGGLE_SAMPLE_OFFSET]);
        let dy = self.noise.get([pos.x - JIGGLE_SAMPLE_OFFSET, pos.y - JIGGLE_SAMPLE_OFFSET]);
        pos + DVec2::new(dx, dy) * JIGGLE_STRENGTH
    }

    /// `resolution x resolution` points spanning `size` world units centered
    /// on `center` (world XZ). Heights are floored at zero.
    pub fn point_map(&self, resolution: usize, size: f64, center: DVec2) -> PointMap {
        let step = 1.0 / (resolution.max(2) - 1) as f64;
        let mut points = Vec::with_capacity(resolution * resolution);

        for y in 0..resolution {
            for x in 0..resolution {
                let local = DVec2::new(x as f64, y as f64) * step - DVec2::splat(0.5);
                let world = self.jiggle(center + local * size);
                let height = (self.elevation(world) + SEA_LEVEL_OFFSET).max(0.0);
                points.push(DVec3::new(world.x, height, world.y));
            }
        }

        PointMap { resolution, points }
    }

    /// Mesh for the grid cell `coord`. Geometry is in world XZ; the model is
    /// placed at `offset`.
    ///
    /// Every grid cell becomes two flat-shaded triangles sharing the cell
    /// diagonal. Each triangle carries its average height in `aux` and in
    /// `tex_coord.x`.
    pub fn build_chunk(
        &self,
        coord: I64Vec2,
        resolution: usize,
        size: f64,
        offset: DVec3,
        shader: SharedShader,
    ) -> Model {
        let center = coord.as_dvec2() * size;
        let map = self.point_map(resolution, size, center);
        let cells = resolution.saturating_sub(1);
        let mut faces = Vec::with_capacity(cells * cells * 2);

        for y in 0..cells {
            for x in 0..cells {
                let a = map.get(x, y);
                let b = map.get(x, y + 1);
                let c = map.get(x + 1, y);
                let d = map.get(x + 1, y + 1);

                let n1 = (b - a).cross(c - b).normalize_or_zero();
                let n2 = (d - b).cross(c - d).normalize_or_zero();

                faces.push(flat_triangle([a, b, c], n1));
                faces.push(flat_triangle([b, d, c], n2));
            }
        }

        count_call!(RENDER_COUNTERS.chunks_generated);
        debug!(
            chunk_x = coord.x,
            chunk_z = coord.y,
            triangles = faces.len(),
            "generated terrain chunk"
        );

        Model::new(chunk_id(coord), faces)
            .with_transform(Transform::new(offset))
            .with_shader(shader)
    }
}

/// Stable model id for a chunk coordinate.
pub fn chunk_id(coord: I64Vec2) -> String {
    format!("chunk_{}_{}", coord.x, coord.y)
}

fn flat_triangle(corners: [DVec3; 3], normal: DVec3) -> Face {
    let height = corners.iter().map(|p| p.y).sum::<f64>() / 3.0;
    let tex_coord = DVec2::new(height, 0.0);
    let vertices = corners.map(|p| Vertex::new(p, tex_coord, normal).with_aux(height));
    Face::from_vertices(&vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::FlatShader;
    use std::sync::Arc;

    #[test]
    fn elevation_is_deterministic_per_seed() {
        let a = TerrainGenerator::new(42);
        let b = TerrainGenerator::new(42);
        let p = DVec2::new(13.7, -42.1);
        assert_eq!(a.elevation(p), b.elevation(p));
        assert_eq!(a.jiggle(p), b.jiggle(p));
    }

    /// Five octaves written out by hand, ridged from the fourth.
    fn reference_elevation(noise: &OpenSimplex, p: DVec2) -> f64 {
        let sample = |frequency: f64| noise.get([p.x * frequency, p.y * frequency]);
        let sum = sample(0.05)
            + 0.5 * sample(0.1)
            + 0.25 * sample(0.2)
            + 0.125 * (0.5 - sample(0.4).abs())
            + 0.0625 * (0.5 - sample(0.8).abs());
        sum * 10.0
    }

    #[test]
    fn elevation_matches_the_octave_sum() {
        let gen = TerrainGenerator::new(42);
        let noise = OpenSimplex::new(42);
        let mut ridged_differs = false;

        for i in 0..64 {
            let p = DVec2::new(i as f64 * 7.31 - 200.0, i as f64 * -3.17 + 55.0);
            let expected = reference_elevation(&noise, p);
            assert!((gen.elevation(p) - expected).abs() < 1e-12, "at {p:?}");

            let unridged = (sample_sum(&noise, p) * 10.0 - expected).abs();
            ridged_differs |= unridged > 1e-6;
        }
        assert!(ridged_differs, "ridge fold never changed a sample");
    }

    fn sample_sum(noise: &OpenSimplex, p: DVec2) -> f64 {
        (0..5)
            .map(|i| {
                let frequency = 0.05 * 2f64.powi(i);
                noise.get([p.x * frequency, p.y * frequency]) * 0.5f64.powi(i)
            })
            .sum()
    }

    #[test]
    fn point_map_heights_are_floored_elevation_at_jiggled_points() {
        let gen = TerrainGenerator::new(9);
        let center = DVec2::new(-15.0, 45.0);
        let map = gen.point_map(7, 30.0, center);

        for y in 0..7 {
            for x in 0..7 {
                let unit = DVec2::new(x as f64, y as f64) * (1.0 / 6.0) - DVec2::splat(0.5);
                let grid = center + unit * 30.0;
                let world = gen.jiggle(grid);
                let expected = (gen.elevation(world) + 1.8).max(0.0);
                let point = map.get(x, y);
                assert!((point.x - world.x).abs() < 1e-9 && (point.z - world.y).abs() < 1e-9);
                assert!((point.y - expected).abs() < 1e-12, "({x}, {y})");
            }
        }
    }

    #[test]
    fn point_map_spans_the_chunk() {
        let gen = TerrainGenerator::new(42);
        let map = gen.point_map(11, 20.0, DVec2::new(40.0, -20.0));
        assert_eq!(map.points().len(), 121);

        // noise output stays within a couple of units, so jiggle is tiny
        let first = map.get(0, 0);
        let last = map.get(10, 10);
        assert!((first.x - 30.0).abs() < 0.2 && (first.z + 30.0).abs() < 0.2);
        assert!((last.x - 50.0).abs() < 0.2 && (last.z + 10.0).abs() < 0.2);
        assert!(map.points().iter().all(|p| p.y >= 0.0));
    }

    #[test]
    fn chunk_mesh_has_two_triangles_per_cell() {
        let gen = TerrainGenerator::new(7);
        let shader: SharedShader = Arc::new(FlatShader::new(DVec3::ONE));
        let offset = DVec3::new(0.0, 0.0, 10.0);
        let model = gen.build_chunk(I64Vec2::new(-1, 3), 6, 10.0, offset, shader);

        assert_eq!(model.id(), "chunk_-1_3");
        assert_eq!(model.faces.len(), 2 * 5 * 5);
        assert_eq!(model.triangle_count(), 50);
        assert_eq!(model.transform.position, DVec3::new(0.0, 0.0, 10.0));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn triangles_are_flat_and_carry_average_height() {
        let gen = TerrainGenerator::new(42);
        let shader: SharedShader = Arc::new(FlatShader::new(DVec3::ONE));
        let model = gen.build_chunk(I64Vec2::ZERO, 5, 20.0, DVec3::ZERO, shader);

        for face in &model.faces {
            let tri = face.triangulate().unwrap()[0];
            let average = tri.0.iter().map(|v| v.position.y).sum::<f64>() / 3.0;
            for v in &tri.0 {
                assert_eq!(v.normal, tri.0[0].normal);
                assert!((v.aux - average).abs() < 1e-12);
                assert_eq!(v.tex_coord, DVec2::new(v.aux, 0.0));
            }
            // heightfield normals point up
            assert!(tri.0[0].normal.y > 0.0);
        }
    }
}
