/// Software rasterizer using a bounding-box barycentric walk.
///
/// Triangles go local -> world -> camera-local -> screen. Screen z keeps the
/// view-space depth, which drives both the depth test and
/// perspective-correct attribute interpolation.
use super::image::Image;
use super::shading::{Fragment, Shader};
use crate::camera::{Camera, Transform};
use crate::count_call;
use crate::error::RenderError;
use crate::math::{clamp, point_in_triangle, signed_triangle_area, DVec2, DVec3};
use crate::meshing::{Model, Triangle, Vertex};
#[cfg(feature = "profiling")]
use crate::perf::RENDER_COUNTERS;
use std::ops::AddAssign;
use tracing::trace;

/// A vertex after projection: `screen.xy` in pixels, `screen.z` view depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenVertex {
    pub screen: DVec3,
    pub tex_coord: DVec2,
    pub normal: DVec3,
    pub aux: f64,
}

impl ScreenVertex {
    #[inline]
    pub fn xy(&self) -> DVec2 {
        self.screen.truncate()
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.screen.z
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenTriangle(pub [ScreenVertex; 3]);

impl ScreenTriangle {
    /// Signed screen-space area; only positive triangles are drawn.
    #[inline]
    pub fn area(&self) -> f64 {
        let [a, b, c] = &self.0;
        signed_triangle_area(a.xy(), b.xy(), c.xy())
    }

    /// Inside test at `p`, and if covered, the perspective-correct fragment.
    ///
    /// Attributes are divided by their vertex depth, weighted, summed and
    /// multiplied back by the depth reconstructed the same way.
    #[inline]
    pub fn fragment_at(&self, p: DVec2) -> Option<Fragment> {
        let [a, b, c] = &self.0;
        let (inside, weights) = point_in_triangle(a.xy(), b.xy(), c.xy(), p);
        if !inside {
            return None;
        }

        // weight / depth per vertex
        let wa = weights.x / a.depth();
        let wb = weights.y / b.depth();
        let wc = weights.z / c.depth();

        let depth = 1.0 / (wa + wb + wc);

        Some(Fragment {
            tex_coord: (a.tex_coord * wa + b.tex_coord * wb + c.tex_coord * wc) * depth,
            normal: (a.normal * wa + b.normal * wb + c.normal * wc) * depth,
            depth,
            aux: (a.aux * wa + b.aux * wb + c.aux * wc) * depth,
        })
    }
}

/// Per-call rasterization tallies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles_submitted: usize,
    /// At least one vertex at or behind the camera plane.
    pub triangles_behind_camera: usize,
    /// Zero or negative screen area.
    pub triangles_rejected: usize,
    pub pixels_tested: usize,
    pub pixels_written: usize,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles_submitted += rhs.triangles_submitted;
        self.triangles_behind_camera += rhs.triangles_behind_camera;
        self.triangles_rejected += rhs.triangles_rejected;
        self.pixels_tested += rhs.pixels_tested;
        self.pixels_written += rhs.pixels_written;
    }
}

/// Projects and fills triangles into an [`Image`].
///
/// Holds the running totals of the current frame; call `begin_frame` before
/// the first model of a frame.
#[derive(Debug, Default)]
pub struct Rasterizer {
    frame: RenderStats,
    frames_rendered: u64,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-frame totals.
    pub fn begin_frame(&mut self) {
        self.frame = RenderStats::default();
    }

    /// Close the frame and return its totals.
    pub fn end_frame(&mut self) -> RenderStats {
        self.frames_rendered += 1;
        trace!(
            frame = self.frames_rendered,
            triangles = self.frame.triangles_submitted,
            behind_camera = self.frame.triangles_behind_camera,
            rejected = self.frame.triangles_rejected,
            pixels_written = self.frame.pixels_written,
            "frame rasterized"
        );
        self.frame
    }

    pub fn frame_stats(&self) -> RenderStats {
        self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Model-local point to screen space for an image of `size` pixels.
    #[inline]
    pub fn project_point(
        local: DVec3,
        model: &Transform,
        camera: &Camera,
        size: DVec2,
    ) -> DVec3 {
        let world = model.to_world_point(local);
        let view = camera.transform.to_local_point(world);
        let depth = view.z;

        let pixels_per_world_unit = size.y / camera.view_plane_half_height() / depth;
        let screen = view.truncate() * pixels_per_world_unit + size / 2.0;
        screen.extend(depth)
    }

    /// Project all three vertices. `None` if any lies at or behind the camera
    /// plane; there is no near-plane clipping, such triangles are dropped whole.
    pub fn project_triangle(
        triangle: &Triangle,
        model: &Transform,
        camera: &Camera,
        size: DVec2,
    ) -> Option<ScreenTriangle> {
        let project = |v: &Vertex| ScreenVertex {
            screen: Self::project_point(v.position, model, camera, size),
            tex_coord: v.tex_coord,
            normal: v.normal,
            aux: v.aux,
        };
        let [a, b, c] = &triangle.0;
        let projected = ScreenTriangle([project(a), project(b), project(c)]);

        if projected.0.iter().any(|v| v.depth() <= 0.0) {
            return None;
        }
        Some(projected)
    }

    /// Draw every face of `model`.
    ///
    /// Fails on a missing shader or an untriangulable face. The check for a
    /// face happens when it is reached, so use [`Model::validate`] first when
    /// a partial draw must be avoided.
    pub fn render_model(
        &mut self,
        model: &Model,
        camera: &Camera,
        image: &mut Image,
    ) -> Result<RenderStats, RenderError> {
        let shader = model.require_shader()?;
        let size = DVec2::new(image.width as f64, image.height as f64);
        let mut stats = RenderStats::default();

        for (index, face) in model.faces.iter().enumerate() {
            let triangles = face
                .triangles()
                .map_err(|source| model.malformed(index, source))?;

            for triangle in triangles {
                count_call!(RENDER_COUNTERS.triangles_submitted);
                stats.triangles_submitted += 1;

                match Self::project_triangle(&triangle, &model.transform, camera, size) {
                    Some(projected) => {
                        self.rasterize_triangle(&projected, &**shader, image, &mut stats)
                    }
                    None => {
                        count_call!(RENDER_COUNTERS.triangles_behind_camera);
                        stats.triangles_behind_camera += 1;
                    }
                }
            }
        }

        self.frame += stats;
        Ok(stats)
    }

    /// Fill one projected triangle.
    pub fn rasterize_triangle(
        &self,
        triangle: &ScreenTriangle,
        shader: &dyn Shader,
        image: &mut Image,
        stats: &mut RenderStats,
    ) {
        if image.width == 0 || image.height == 0 {
            return;
        }

        if triangle.area() <= 0.0 {
            count_call!(RENDER_COUNTERS.triangles_rejected);
            stats.triangles_rejected += 1;
            return;
        }

        let [a, b, c] = &triangle.0;
        let min = a.xy().min(b.xy()).min(c.xy());
        let max = a.xy().max(b.xy()).max(c.xy());

        let max_x = (image.width - 1) as f64;
        let max_y = (image.height - 1) as f64;
        let start_x = clamp(min.x, 0.0, max_x) as usize;
        let start_y = clamp(min.y, 0.0, max_y) as usize;
        let end_x = clamp(max.x, 0.0, max_x) as usize;
        let end_y = clamp(max.y, 0.0, max_y) as usize;

        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let p = DVec2::new(x as f64, y as f64);
                let Some(fragment) = triangle.fragment_at(p) else {
                    continue;
                };

                count_call!(RENDER_COUNTERS.pixels_tested);
                stats.pixels_tested += 1;

                if let Some(index) = image.test_depth_and_get_index(x, y, fragment.depth) {
                    image.write_color(index, shader.pixel_color(&fragment));
                    count_call!(RENDER_COUNTERS.depth_passed);
                    stats.pixels_written += 1;
                } else {
                    count_call!(RENDER_COUNTERS.depth_failed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meshing::Face;
    use crate::rendering::shading::FlatShader;
    use std::sync::Arc;

    fn screen_vertex(x: f64, y: f64, depth: f64, uv: DVec2) -> ScreenVertex {
        ScreenVertex {
            screen: DVec3::new(x, y, depth),
            tex_coord: uv,
            normal: DVec3::NEG_Z,
            aux: 0.0,
        }
    }

    #[test]
    fn projection_centers_points_on_the_view_axis() {
        let camera = Camera::new(DVec3::ZERO, 90f64.to_radians());
        let size = DVec2::new(100.0, 50.0);
        let identity = Transform::default();
        let p = Rasterizer::project_point(DVec3::new(0.0, 0.0, 4.0), &identity, &camera, size);
        assert!((p - DVec3::new(50.0, 25.0, 4.0)).length() < 1e-9);

        // tan(45°) = 1, so one unit at depth 2 is height / 2 pixels
        let p = Rasterizer::project_point(DVec3::new(1.0, 0.0, 2.0), &identity, &camera, size);
        assert!((p.x - 75.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_touching_camera_plane_is_culled() {
        let camera = Camera::new(DVec3::ZERO, 90f64.to_radians());
        let triangle = Triangle([
            Vertex::new(DVec3::new(0.0, 0.0, 0.0), DVec2::ZERO, DVec3::Z),
            Vertex::new(DVec3::new(0.0, 1.0, 5.0), DVec2::ZERO, DVec3::Z),
            Vertex::new(DVec3::new(1.0, 0.0, 5.0), DVec2::ZERO, DVec3::Z),
        ]);
        let size = DVec2::new(32.0, 32.0);
        let projected =
            Rasterizer::project_triangle(&triangle, &Transform::default(), &camera, size);
        assert!(projected.is_none());
    }

    #[test]
    fn fragment_depth_is_harmonic_not_linear() {
        let tri = ScreenTriangle([
            screen_vertex(0.0, 0.0, 2.0, DVec2::new(0.0, 0.0)),
            screen_vertex(0.0, 10.0, 2.0, DVec2::new(0.0, 0.0)),
            screen_vertex(10.0, 0.0, 6.0, DVec2::new(1.0, 0.0)),
        ]);

        // midpoint of edge a-c
        let fragment = tri.fragment_at(DVec2::new(5.0, 0.0)).unwrap();
        let expected_depth = 1.0 / (0.5 / 2.0 + 0.5 / 6.0);
        assert!((fragment.depth - expected_depth).abs() < 1e-12);

        // affine interpolation would give 0.5
        let expected_u = expected_depth * (0.5 * 1.0 / 6.0);
        assert!((fragment.tex_coord.x - expected_u).abs() < 1e-12);
        assert!((fragment.tex_coord.x - 0.5).abs() > 0.1);
    }

    #[test]
    fn back_facing_triangle_is_rejected() {
        let mut image = Image::new(16, 16);
        let mut stats = RenderStats::default();
        let tri = ScreenTriangle([
            screen_vertex(1.0, 1.0, 1.0, DVec2::ZERO),
            screen_vertex(12.0, 1.0, 1.0, DVec2::ZERO),
            screen_vertex(1.0, 12.0, 1.0, DVec2::ZERO),
        ]);
        let shader = FlatShader::new(DVec3::ONE);
        Rasterizer::new().rasterize_triangle(&tri, &shader, &mut image, &mut stats);
        assert_eq!(stats.triangles_rejected, 1);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn rendering_without_shader_is_an_error() {
        let model = Model::new("bare", crate::meshing::cube(1.0));
        let camera = Camera::default();
        let mut image = Image::new(8, 8);
        let err = Rasterizer::new().render_model(&model, &camera, &mut image).unwrap_err();
        assert!(matches!(err, RenderError::MissingShader { .. }));
    }

    #[test]
    fn malformed_face_aborts_model() {
        let face = Face::new(vec![DVec3::Z; 2], vec![DVec2::ZERO; 2], vec![DVec3::Z; 2]);
        let model =
            Model::new("bad", vec![face]).with_shader(Arc::new(FlatShader::new(DVec3::ONE)));
        let mut image = Image::new(8, 8);
        let err = Rasterizer::new()
            .render_model(&model, &Camera::default(), &mut image)
            .unwrap_err();
        assert!(matches!(err, RenderError::MalformedGeometry { face: 0, .. }));
    }

    #[test]
    fn frame_totals_accumulate_across_models() {
        let shader: crate::rendering::SharedShader = Arc::new(FlatShader::new(DVec3::ONE));
        let model = Model::new("cube", crate::meshing::cube(1.0))
            .with_transform(Transform::new(DVec3::new(0.0, 0.0, 5.0)))
            .with_shader(shader);
        let camera = Camera::default();
        let mut image = Image::new(32, 32);
        let mut rasterizer = Rasterizer::new();

        rasterizer.begin_frame();
        let first = rasterizer.render_model(&model, &camera, &mut image).unwrap();
        let second = rasterizer.render_model(&model, &camera, &mut image).unwrap();
        let frame = rasterizer.end_frame();

        assert_eq!(first.triangles_submitted, 12);
        assert_eq!(frame.triangles_submitted, 24);
        assert!(first.pixels_written > 0);
        // identical geometry at identical depth never passes a strict test
        assert_eq!(second.pixels_written, 0);
        assert_eq!(rasterizer.frames_rendered(), 1);
    }
}
