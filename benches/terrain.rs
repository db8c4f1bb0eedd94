/// Terrain benchmarks: noise sampling, chunk meshing and streaming.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use terrain_raster::camera::Camera;
use terrain_raster::config::ChunkerConfig;
use terrain_raster::math::{DVec2, DVec3, I64Vec2};
use terrain_raster::rendering::{FlatShader, Image, Rasterizer, SharedShader};
use terrain_raster::terrain::{Chunker, TerrainGenerator};
use terrain_raster::Scene;

fn bench_elevation(c: &mut Criterion) {
    let generator = TerrainGenerator::new(42);
    c.bench_function("elevation_sample", |b| {
        b.iter(|| black_box(generator.elevation(black_box(DVec2::new(123.4, -56.7)))));
    });
}

fn bench_build_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk");
    let generator = TerrainGenerator::new(42);
    let shader: SharedShader = Arc::new(FlatShader::new(DVec3::ONE));

    for resolution in [10usize, 30, 60] {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, &resolution| {
                b.iter(|| {
                    black_box(generator.build_chunk(
                        I64Vec2::new(3, -2),
                        resolution,
                        20.0,
                        DVec3::ZERO,
                        shader.clone(),
                    ))
                });
            },
        );
    }
    group.finish();
}

fn bench_chunk_streaming(c: &mut Criterion) {
    c.bench_function("chunker_update_cached", |b| {
        let mut chunker = Chunker::from_config(ChunkerConfig::default(), DVec3::ONE)
            .expect("default chunker config is valid");
        chunker.update(DVec3::ZERO);
        b.iter(|| black_box(chunker.update(black_box(DVec3::new(1.0, 0.0, 1.0))).len()));
    });

    c.bench_function("chunker_walk", |b| {
        let mut chunker = Chunker::from_config(ChunkerConfig::default(), DVec3::ONE)
            .expect("default chunker config is valid");
        let mut step = 0.0;
        b.iter(|| {
            step += 20.0;
            black_box(chunker.update(DVec3::new(step, 0.0, 0.0)).len())
        });
    });
}

fn bench_terrain_frame(c: &mut Criterion) {
    c.bench_function("terrain_frame_320x180", |b| {
        let chunker = Chunker::from_config(ChunkerConfig::default(), DVec3::ONE)
            .expect("default chunker config is valid");
        let mut camera = Camera::default();
        camera.transform.position = DVec3::new(0.0, 6.0, 0.0);
        camera.transform.set_pitch(-0.2);
        let mut scene = Scene::new(camera, DVec3::ONE).with_chunker(chunker);
        let mut image = Image::new(320, 180);
        let mut rasterizer = Rasterizer::new();

        b.iter(|| black_box(scene.render(&mut rasterizer, &mut image).ok()));
    });
}

criterion_group!(
    benches,
    bench_elevation,
    bench_build_chunk,
    bench_chunk_streaming,
    bench_terrain_frame
);
criterion_main!(benches);
