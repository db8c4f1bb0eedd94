//! Terrain generation and chunk streaming.
use std::sync::Arc;
use terrain_raster::config::ChunkerConfig;
use terrain_raster::math::{DVec2, DVec3, I64Vec2};
use terrain_raster::rendering::{FlatShader, SharedShader};
use terrain_raster::terrain::{chunk_id, Chunker, TerrainGenerator, MIN_RETAIN_RADIUS};

fn config() -> ChunkerConfig {
    ChunkerConfig {
        resolution: 5,
        chunk_size: 20.0,
        ..Default::default()
    }
}

#[test]
fn same_coordinate_returns_the_cached_model() {
    let mut chunker = Chunker::from_config(config(), DVec3::ONE).unwrap();
    let coord = I64Vec2::new(-7, 12);

    let first = chunker.chunk(coord);
    let second = chunker.chunk(coord);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.id(), chunk_id(coord));
    assert_eq!(chunker.cached_count(), 1);
}

#[test]
fn generation_is_deterministic_across_chunkers() {
    let shader: SharedShader = Arc::new(FlatShader::new(DVec3::ONE));
    let mut a = Chunker::new(config(), shader.clone()).unwrap();
    let mut b = Chunker::new(config(), shader).unwrap();

    let coord = I64Vec2::new(2, -1);
    assert_eq!(a.chunk(coord).faces, b.chunk(coord).faces);
}

#[test]
fn seeds_produce_different_terrain() {
    let a = TerrainGenerator::new(1);
    let b = TerrainGenerator::new(2);
    let map_a = a.point_map(16, 40.0, DVec2::ZERO);
    let map_b = b.point_map(16, 40.0, DVec2::ZERO);
    assert_ne!(map_a, map_b);
}

#[test]
fn neighbouring_chunks_share_their_border() {
    let gen = TerrainGenerator::new(42);
    let size = 20.0;
    let resolution = 9;
    let west = gen.point_map(resolution, size, DVec2::new(0.0, 0.0));
    let east = gen.point_map(resolution, size, DVec2::new(size, 0.0));

    for y in 0..resolution {
        let edge = west.get(resolution - 1, y);
        let other = east.get(0, y);
        assert!((edge - other).length() < 1e-9, "row {y}: {edge:?} vs {other:?}");
    }
}

#[test]
fn walking_keeps_the_cache_bounded() {
    let mut chunker = Chunker::from_config(config(), DVec3::ONE).unwrap();
    let radius = chunker.retain_radius().max(MIN_RETAIN_RADIUS);
    let max_cached = ((2 * radius + 1) * (2 * radius + 1)) as usize;

    for step in 0..40 {
        let position = DVec3::new(step as f64 * 10.0, 5.0, step as f64 * 3.0);
        let active = chunker.update(position);
        assert_eq!(active.len(), 25);
        assert!(chunker.cached_count() <= max_cached);
    }

    let center = chunker.camera_chunk().unwrap();
    assert_eq!(center, chunker.world_to_chunk(DVec3::new(390.0, 0.0, 117.0)));
    for active in chunker.active() {
        assert!(active.id().starts_with("chunk_"));
    }
}
