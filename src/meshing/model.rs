use super::mesh::Face;
use crate::camera::Transform;
use crate::error::{GeometryError, RenderError};
use crate::rendering::shading::SharedShader;

/// A named, posed, shaded set of faces.
#[derive(Clone)]
pub struct Model {
    id: String,
    pub faces: Vec<Face>,
    pub transform: Transform,
    /// Must be set before the model is rendered.
    pub shader: Option<SharedShader>,
}

impl Model {
    pub fn new(id: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            id: id.into(),
            faces,
            transform: Transform::default(),
            shader: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_shader(mut self, shader: SharedShader) -> Self {
        self.shader = Some(shader);
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }

    /// The assigned shader, or the configuration error for rendering without one.
    pub fn require_shader(&self) -> Result<&SharedShader, RenderError> {
        self.shader.as_ref().ok_or_else(|| RenderError::MissingShader {
            model: self.id.clone(),
        })
    }

    /// Check everything rendering would otherwise fail on halfway through.
    pub fn validate(&self) -> Result<(), RenderError> {
        self.require_shader()?;
        for (index, face) in self.faces.iter().enumerate() {
            face.validate()
                .map_err(|source| self.malformed(index, source))?;
        }
        Ok(())
    }

    pub(crate) fn malformed(&self, face: usize, source: GeometryError) -> RenderError {
        RenderError::MalformedGeometry {
            model: self.id.clone(),
            face,
            source,
        }
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("faces", &self.faces.len())
            .field("transform", &self.transform)
            .field("has_shader", &self.shader.is_some())
            .finish()
    }
}
