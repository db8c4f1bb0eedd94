/// Vector helpers shared by the transform, rasterizer and terrain code.
/// Everything is double precision; screen-space tests run on the same type
/// as world-space math so projected values never lose precision.
pub use glam::{DVec2, DVec3, I64Vec2};

/// Clamp a scalar into `[lo, hi]`.
#[inline]
pub fn clamp(n: f64, lo: f64, hi: f64) -> f64 {
    if n > hi {
        hi
    } else if n < lo {
        lo
    } else {
        n
    }
}

/// Component-wise linear blend, `p = 0` gives `a`, `p = 1` gives `b`.
#[inline]
pub fn lerp(a: DVec3, b: DVec3, p: f64) -> DVec3 {
    a * (1.0 - p) + b * p
}

/// Vector rotated 90° clockwise.
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(v.y, -v.x)
}

/// Signed area of triangle `abc`. Positive when `a -> b -> c` winds
/// clockwise in an x-right / y-up frame.
#[inline]
pub fn signed_triangle_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let ac = c - a;
    let ab_perp = perpendicular(b - a);
    ac.dot(ab_perp) / 2.0
}

/// Inside test plus barycentric weights for point `p` against triangle `abc`.
///
/// Returns `(inside, weights)` where `weights = (wA, wB, wC)`. The boundary is
/// inclusive; triangles with zero or negative total area never contain a
/// point. Weights are still returned for rejected points (they may be
/// non-finite for degenerate triangles).
#[inline]
pub fn point_in_triangle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> (bool, DVec3) {
    let area_abp = signed_triangle_area(a, b, p);
    let area_bcp = signed_triangle_area(b, c, p);
    let area_cap = signed_triangle_area(c, a, p);

    let total_area = area_abp + area_bcp + area_cap;
    let weights = DVec3::new(
        area_bcp / total_area,
        area_cap / total_area,
        area_abp / total_area,
    );

    let inside = area_abp >= 0.0 && area_bcp >= 0.0 && area_cap >= 0.0 && total_area > 0.0;
    (inside, weights)
}

/// Express `v` in the frame spanned by the basis vectors `ihat, jhat, khat`.
#[inline]
pub fn transform_vector(ihat: DVec3, jhat: DVec3, khat: DVec3, v: DVec3) -> DVec3 {
    ihat * v.x + jhat * v.y + khat * v.z
}

/// Pack a linear 0..1 color into a 32-bit ARGB word with opaque alpha.
#[inline]
pub fn to_argb(color: DVec3) -> u32 {
    let r = (clamp(color.x, 0.0, 1.0) * 255.0) as u32;
    let g = (clamp(color.y, 0.0, 1.0) * 255.0) as u32;
    let b = (clamp(color.z, 0.0, 1.0) * 255.0) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}
