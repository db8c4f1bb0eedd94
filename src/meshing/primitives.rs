/// Small built-in meshes for tests, benchmarks and the demo scene.
///
/// Faces are wound so that `(b - a) x (c - a)` points outward, which is the
/// winding the rasterizer accepts as front-facing.
use super::mesh::{Face, Vertex};
use crate::math::{DVec2, DVec3};

/// Axis-aligned cube centered on the origin: 6 quads, 12 triangles.
pub fn cube(size: f64) -> Vec<Face> {
    let s = size / 2.0;
    let corners = |points: [[f64; 3]; 4], normal: DVec3| {
        let uvs = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let vertices: Vec<Vertex> = points
            .iter()
            .zip(uvs)
            .map(|(p, uv)| Vertex::new(DVec3::from_array(*p) * s, uv, normal))
            .collect();
        Face::from_vertices(&vertices)
    };

    vec![
        corners(
            [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
            DVec3::NEG_Z,
        ),
        corners(
            [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
            DVec3::Z,
        ),
        corners(
            [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
            DVec3::NEG_X,
        ),
        corners(
            [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
            DVec3::X,
        ),
        corners(
            [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
            DVec3::NEG_Y,
        ),
        corners(
            [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
            DVec3::Y,
        ),
    ]
}

/// Single quad in the XY plane facing -Z (towards a camera looking down +Z).
pub fn quad(width: f64, height: f64) -> Face {
    let (w, h) = (width / 2.0, height / 2.0);
    Face::from_vertices(&[
        Vertex::new(DVec3::new(-w, -h, 0.0), DVec2::new(0.0, 0.0), DVec3::NEG_Z),
        Vertex::new(DVec3::new(-w, h, 0.0), DVec2::new(0.0, 1.0), DVec3::NEG_Z),
        Vertex::new(DVec3::new(w, h, 0.0), DVec2::new(1.0, 1.0), DVec3::NEG_Z),
        Vertex::new(DVec3::new(w, -h, 0.0), DVec2::new(1.0, 0.0), DVec3::NEG_Z),
    ])
}
