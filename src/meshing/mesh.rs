/// Polygon data structures consumed by the rasterizer.
use crate::error::GeometryError;
use crate::math::{DVec2, DVec3};

/// Per-vertex attributes carried through rasterization.
///
/// `aux` is a free scalar slot interpolated like the other attributes. The
/// terrain mesher stores triangle-average height there.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Vertex {
    pub position: DVec3,
    pub tex_coord: DVec2,
    pub normal: DVec3,
    pub aux: f64,
}

impl Vertex {
    #[inline]
    pub const fn new(position: DVec3, tex_coord: DVec2, normal: DVec3) -> Self {
        Self {
            position,
            tex_coord,
            normal,
            aux: 0.0,
        }
    }

    #[inline]
    pub const fn with_aux(mut self, aux: f64) -> Self {
        self.aux = aux;
        self
    }
}

/// Three vertices of a fan-triangulated face, in face winding order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle(pub [Vertex; 3]);

/// One planar polygon. Attributes are stored as parallel arrays, the way
/// mesh loaders hand them over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    positions: Vec<DVec3>,
    tex_coords: Vec<DVec2>,
    normals: Vec<DVec3>,
    aux: Vec<f64>,
}

impl Face {
    /// Build a face from parallel attribute arrays. Counts are checked when
    /// the face is triangulated, not here.
    pub fn new(positions: Vec<DVec3>, tex_coords: Vec<DVec2>, normals: Vec<DVec3>) -> Self {
        let aux = vec![0.0; positions.len()];
        Self {
            positions,
            tex_coords,
            normals,
            aux,
        }
    }

    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self {
            positions: vertices.iter().map(|v| v.position).collect(),
            tex_coords: vertices.iter().map(|v| v.tex_coord).collect(),
            normals: vertices.iter().map(|v| v.normal).collect(),
            aux: vertices.iter().map(|v| v.aux).collect(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of fan triangles this face produces (n - 2).
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len().saturating_sub(2)
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Assembled vertex `i`. Callers must have validated the face.
    #[inline]
    fn vertex(&self, i: usize) -> Vertex {
        Vertex {
            position: self.positions[i],
            tex_coord: self.tex_coords[i],
            normal: self.normals[i],
            aux: self.aux.get(i).copied().unwrap_or(0.0),
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let count = self.positions.len();
        if self.tex_coords.len() != count || self.normals.len() != count {
            return Err(GeometryError::AttributeMismatch {
                positions: count,
                tex_coords: self.tex_coords.len(),
                normals: self.normals.len(),
            });
        }
        if count < 3 {
            return Err(GeometryError::TooFewVertices { count });
        }
        Ok(())
    }

    /// Fan triangulation `(0, i, i + 1)`, lazily.
    pub fn triangles(&self) -> Result<impl Iterator<Item = Triangle> + '_, GeometryError> {
        self.validate()?;
        Ok((1..self.positions.len() - 1)
            .map(move |i| Triangle([self.vertex(0), self.vertex(i), self.vertex(i + 1)])))
    }

    /// Fan triangulation collected into a vector.
    pub fn triangulate(&self) -> Result<Vec<Triangle>, GeometryError> {
        Ok(self.triangles()?.collect())
    }
}
