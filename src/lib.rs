//! Terrain Raster - CPU triangle rasterizer with streamed noise terrain
//! Double precision throughout, one thread, one image per frame

pub mod camera;
pub mod config;
pub mod error;
pub mod math;
pub mod meshing;
pub mod perf;
pub mod rendering;
pub mod scene;
pub mod terrain;

pub use camera::{Camera, CameraController, Transform};
pub use config::{CameraConfig, ChunkerConfig, RenderConfig};
pub use error::{GeometryError, RenderError};
pub use meshing::{Face, Model, Triangle, Vertex};
pub use perf::{CounterSnapshot, RenderCounters, RENDER_COUNTERS};
pub use rendering::{Image, Rasterizer, RenderStats, Shader, SharedShader};
pub use scene::Scene;
pub use terrain::{Chunker, TerrainGenerator};
