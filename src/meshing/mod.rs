/// Geometry handed to the rasterizer: faces, models and a few primitives.
pub mod mesh;
pub mod model;
pub mod primitives;

pub use mesh::{Face, Triangle, Vertex};
pub use model::Model;
pub use primitives::{cube, quad};
