//! Independent gain masks (spec §3 `Mask`).

use crate::dynobject::DynObject;
use aural_core::Vec3;

/// Whether a [`Mask`] attenuates the space *inside* its box (an
/// exclusion zone) or *outside* it (a containment zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskMode {
    Inside,
    Outside,
}

/// A box-shaped gain mask that contributes to every opt-in receiver's
/// global gain (spec §3, §4.5 step 6's "mask-plugin gain").
#[derive(Debug, Clone)]
pub struct Mask {
    pub object: DynObject,
    pub size: Vec3,
    pub falloff: f32,
    pub mode: MaskMode,
}

impl Mask {
    pub fn new(name: impl Into<String>, size: Vec3, falloff: f32, mode: MaskMode) -> Self {
        Self { object: DynObject::new(name), size, falloff, mode }
    }

    /// Gain contribution for a world-space point `p`, given the mask's
    /// current pose. `1.0` deep inside an `Inside` mask's box (or deep
    /// outside an `Outside` mask's), ramping through a half-cosine
    /// transition of width `falloff` at the boundary, `0.0` beyond it.
    pub fn gain_at(&self, p: Vec3) -> f32 {
        let pose = self.object.last_pose();
        let local = (p - pose.position) / pose.orientation;
        let half = self.size * 0.5;

        let dx = (local.x.abs() - half.x).max(0.0);
        let dy = (local.y.abs() - half.y).max(0.0);
        let dz = (local.z.abs() - half.z).max(0.0);
        let outside_dist = (dx * dx + dy * dy + dz * dz).sqrt();

        let inside = outside_dist <= f32::EPSILON;
        let t = if self.falloff > f32::EPSILON { (outside_dist / self.falloff).min(1.0) } else if inside { 0.0 } else { 1.0 };
        let falloff_gain = 0.5 * (1.0 + (core::f32::consts::PI * t).cos());

        match self.mode {
            MaskMode::Inside => falloff_gain,
            MaskMode::Outside => 1.0 - falloff_gain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_at_origin(mode: MaskMode) -> Mask {
        let mut m = Mask::new("m", Vec3::new(1.0, 1.0, 1.0), 0.2, mode);
        m.object.update(0.0, Vec3::ZERO);
        m
    }

    #[test]
    fn inside_mask_is_full_gain_at_center() {
        let m = mask_at_origin(MaskMode::Inside);
        assert!((m.gain_at(Vec3::ZERO) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn inside_mask_is_zero_far_outside() {
        let m = mask_at_origin(MaskMode::Inside);
        assert!(m.gain_at(Vec3::new(10.0, 10.0, 10.0)) < 1e-5);
    }

    #[test]
    fn outside_mask_is_inverse_of_inside() {
        let inside = mask_at_origin(MaskMode::Inside);
        let outside = mask_at_origin(MaskMode::Outside);
        for p in [Vec3::ZERO, Vec3::new(0.6, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)] {
            let a = inside.gain_at(p);
            let b = outside.gain_at(p);
            assert!((a + b - 1.0).abs() < 1e-5, "{} {} at {:?}", a, b, p);
        }
    }

    #[test]
    fn transition_is_monotonic_moving_outward() {
        let m = mask_at_origin(MaskMode::Inside);
        let mut prev = m.gain_at(Vec3::new(0.5, 0.0, 0.0));
        for i in 1..10 {
            let x = 0.5 + i as f32 * 0.05;
            let g = m.gain_at(Vec3::new(x, 0.0, 0.0));
            assert!(g <= prev + 1e-6, "{} then {}", prev, g);
            prev = g;
        }
    }
}
