/// Procedural terrain: noise heightfield meshing and chunk streaming
pub mod chunker;
pub mod generator;

pub use chunker::{Chunker, ACTIVE_RADIUS, MAX_CHUNK_COORD, MIN_RETAIN_RADIUS};
pub use generator::{chunk_id, PointMap, TerrainGenerator};
