use thiserror::Error;

/// Configuration and content errors surfaced by the core.
///
/// These always abort the operation that hit them. Degenerate geometry is
/// not represented here: such triangles are skipped during rasterization.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("model `{model}` has no shader assigned")]
    MissingShader { model: String },

    #[error("model id `{id}` is already present in the scene")]
    DuplicateModel { id: String },

    #[error("no model with id `{id}` in the scene")]
    UnknownModel { id: String },

    #[error("face {face} of model `{model}` is malformed")]
    MalformedGeometry {
        model: String,
        face: usize,
        #[source]
        source: GeometryError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Why a single face cannot be triangulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("a face needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error(
        "attribute counts differ: {positions} positions, {tex_coords} texcoords, {normals} normals"
    )]
    AttributeMismatch {
        positions: usize,
        tex_coords: usize,
        normals: usize,
    },
}
