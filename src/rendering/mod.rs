pub mod image;
/// Software rasterization pipeline
/// Single-threaded, double precision, one bounding-box walk per triangle
pub mod rasterizer;
pub mod shading;
pub mod texture;

pub use image::Image;
pub use rasterizer::{Rasterizer, RenderStats, ScreenTriangle, ScreenVertex};
pub use shading::{
    FlatShader, Fragment, LitShader, LitTextureShader, Shader, SharedShader, TerrainShader,
    TextureShader,
};
pub use texture::Texture;
