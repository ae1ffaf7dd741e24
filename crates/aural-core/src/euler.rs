//! Euler-angle rotations: intrinsic z-then-y-then-x, right-handed.
//!
//! A [`Euler`] composes with another by simple component-wise angle addition
//! (not matrix composition) — this matches how dynamic objects fold a
//! `delta_orientation` onto a sampled trajectory orientation (spec §3/§4.2):
//! a cheap approximation that is exact for small deltas and is what the
//! engine this was distilled from does.

use crate::vector3::Vec3;
use libm::{cosf, sinf};

/// Rotation by z, then y, then x, each intrinsic and right-handed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub z: f32,
    pub y: f32,
    pub x: f32,
}

impl Euler {
    pub const IDENTITY: Euler = Euler { z: 0.0, y: 0.0, x: 0.0 };

    #[inline]
    pub const fn new(z: f32, y: f32, x: f32) -> Self {
        Self { z, y, x }
    }

    fn rot_z(v: Vec3, a: f32) -> Vec3 {
        let (s, c) = (sinf(a), cosf(a));
        Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
    }

    fn rot_y(v: Vec3, a: f32) -> Vec3 {
        let (s, c) = (sinf(a), cosf(a));
        Vec3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
    }

    fn rot_x(v: Vec3, a: f32) -> Vec3 {
        let (s, c) = (sinf(a), cosf(a));
        Vec3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
    }

    /// Rotates `v` from the local frame described by `self` into the world
    /// frame (applies z, then y, then x).
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let v = Self::rot_z(v, self.z);
        let v = Self::rot_y(v, self.y);
        Self::rot_x(v, self.x)
    }

    /// Rotates `v` from world frame back into the local frame described by
    /// `self` — the exact inverse of [`rotate`](Self::rotate).
    pub fn unrotate(&self, v: Vec3) -> Vec3 {
        let v = Self::rot_x(v, -self.x);
        let v = Self::rot_y(v, -self.y);
        Self::rot_z(v, -self.z)
    }

    /// Component-wise angle sum, used to fold a delta-orientation onto a
    /// base orientation (spec §3/§4.2). Not a true rotation composition.
    pub fn compose(&self, delta: Euler) -> Euler {
        Euler::new(self.z + delta.z, self.y + delta.y, self.x + delta.x)
    }

    /// Component-wise angle difference, used to approximate the rotation
    /// that carries a world-frame orientation into another object's local
    /// frame (spec §4.6 step 2, rotating a diffuse field's FOA buffer into
    /// a receiver's frame). Like `compose`, not a true inverse composition.
    pub fn relative_to(&self, other: Euler) -> Euler {
        Euler::new(self.z - other.z, self.y - other.y, self.x - other.x)
    }

    /// Builds an orientation whose local +x axis points along `tangent`,
    /// used for "sampled orientation" derived from a trajectory's tangent
    /// (spec §4.2 step 1): azimuth and elevation of the tangent, zero roll.
    pub fn facing(tangent: Vec3) -> Euler {
        Euler::new(tangent.azim(), tangent.elev(), 0.0)
    }
}

impl core::ops::Mul<Euler> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Euler) -> Vec3 {
        rhs.rotate(self)
    }
}

impl core::ops::Div<Euler> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: Euler) -> Vec3 {
        rhs.unrotate(self)
    }
}
