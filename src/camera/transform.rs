/// Position / yaw / pitch / scale with cached basis vectors.
///
/// Rotation is private: every mutation goes through a setter that recomputes
/// the forward and inverse bases together, so the cache can never go stale.
use crate::math::{transform_vector, DVec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    /// Non-uniform scale, applied on top of the rotation. Must be non-zero
    /// on every axis for `to_local_point`.
    pub scale: DVec3,
    yaw: f64,
    pitch: f64,
    basis: Basis,
    inverse: Basis,
}

/// Three column vectors describing a rotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub ihat: DVec3,
    pub jhat: DVec3,
    pub khat: DVec3,
}

impl Basis {
    pub const IDENTITY: Self = Self {
        ihat: DVec3::X,
        jhat: DVec3::Y,
        khat: DVec3::Z,
    };

    /// Rotation about Y in the XZ plane.
    fn yaw(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            ihat: DVec3::new(cos, 0.0, sin),
            jhat: DVec3::Y,
            khat: DVec3::new(-sin, 0.0, cos),
        }
    }

    /// Rotation about X in the YZ plane.
    fn pitch(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            ihat: DVec3::X,
            jhat: DVec3::new(0.0, cos, -sin),
            khat: DVec3::new(0.0, sin, cos),
        }
    }

    /// Express each vector of `inner` in this frame.
    fn compose(&self, inner: &Basis) -> Self {
        Self {
            ihat: self.apply(inner.ihat),
            jhat: self.apply(inner.jhat),
            khat: self.apply(inner.khat),
        }
    }

    #[inline]
    pub fn apply(&self, v: DVec3) -> DVec3 {
        transform_vector(self.ihat, self.jhat, self.khat, v)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(DVec3::ZERO)
    }
}

impl Transform {
    /// Unrotated, unit-scale transform at `position`.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            scale: DVec3::ONE,
            yaw: 0.0,
            pitch: 0.0,
            basis: Basis::IDENTITY,
            inverse: Basis::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, yaw: f64, pitch: f64) -> Self {
        self.set_rotation(yaw, pitch);
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn set_yaw(&mut self, yaw: f64) {
        self.set_rotation(yaw, self.pitch);
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.set_rotation(self.yaw, pitch);
    }

    /// Set both angles and refresh the cached bases.
    pub fn set_rotation(&mut self, yaw: f64, pitch: f64) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_bases();
    }

    fn update_bases(&mut self) {
        // Pitch vectors expressed in the yaw-rotated frame.
        self.basis = Basis::yaw(self.yaw).compose(&Basis::pitch(self.pitch));
        // Built from negated angles in reverse order rather than by inverting `basis`.
        self.inverse = Basis::pitch(-self.pitch).compose(&Basis::yaw(-self.yaw));
    }

    #[inline]
    pub fn basis(&self) -> Basis {
        self.basis
    }

    #[inline]
    pub fn inverse_basis(&self) -> Basis {
        self.inverse
    }

    /// Local right / up / forward directions in world space (unscaled).
    #[inline]
    pub fn right(&self) -> DVec3 {
        self.basis.ihat
    }

    #[inline]
    pub fn up(&self) -> DVec3 {
        self.basis.jhat
    }

    #[inline]
    pub fn forward(&self) -> DVec3 {
        self.basis.khat
    }

    /// Scale along the local axes, rotate, then translate.
    #[inline]
    pub fn to_world_point(&self, local: DVec3) -> DVec3 {
        let Basis { ihat, jhat, khat } = self.basis;
        transform_vector(
            ihat * self.scale.x,
            jhat * self.scale.y,
            khat * self.scale.z,
            local,
        ) + self.position
    }

    /// Exact inverse of [`Transform::to_world_point`].
    #[inline]
    pub fn to_local_point(&self, world: DVec3) -> DVec3 {
        self.inverse.apply(world - self.position) / self.scale
    }
}
