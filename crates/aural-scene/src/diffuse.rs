//! Diffuse sound fields: a moving box-shaped ambisonic source (spec §3
//! `DiffuseField`, §4.6 Diffuse Path).

use crate::dynobject::DynObject;
use aural_core::{FoaBuffer, Vec3};

/// A first-order-ambisonic diffuse sound field anchored to a moving
/// [`DynObject`]. Consumed in the receiver's frame: at render time the
/// stored FOA buffer is rotated by the receiver's inverse orientation
/// (spec §3 invariant).
#[derive(Debug, Clone)]
pub struct DiffuseField {
    pub object: DynObject,
    pub audio: FoaBuffer,
    pub size: Vec3,
    pub falloff: f32,
    pub layers: u32,
    /// Linear gain applied on top of the box falloff.
    pub gain: f32,
    /// Calibration reference level in dB-SPL, used to interpret `gain`.
    pub calib_level_db: f32,
}

impl DiffuseField {
    pub fn new(name: impl Into<String>, block_len: usize) -> Self {
        Self {
            object: DynObject::new(name),
            audio: FoaBuffer::new(block_len),
            size: Vec3::ZERO,
            falloff: 0.0,
            layers: 1,
            gain: 1.0,
            calib_level_db: 0.0,
        }
    }

    pub fn on_layer(&self, receiver_layers: u32) -> bool {
        self.layers & receiver_layers != 0
    }

    /// Box-falloff gain for a point `p_rotated`, already expressed in the
    /// field's local frame (spec §4.6 step 1): `1.0` inside the box,
    /// ramping to `0.0` over `falloff` meters beyond its boundary.
    pub fn box_falloff(&self, p_local: Vec3) -> f32 {
        let half = self.size * 0.5;
        let dx = (p_local.x.abs() - half.x).max(0.0);
        let dy = (p_local.y.abs() - half.y).max(0.0);
        let dz = (p_local.z.abs() - half.z).max(0.0);
        let d = (dx * dx + dy * dy + dz * dz).sqrt();
        if self.falloff <= f32::EPSILON {
            return if d <= f32::EPSILON { 1.0 } else { 0.0 };
        }
        let t = (d / self.falloff).min(1.0);
        0.5 * (1.0 + (core::f32::consts::PI * t).cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_box_has_full_gain() {
        let field = DiffuseField::new("d", 64);
        let mut field = DiffuseField { size: Vec3::new(2.0, 2.0, 2.0), falloff: 1.0, ..field };
        field.object.update(0.0, Vec3::ZERO);
        assert!((field.box_falloff(Vec3::ZERO) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn gain_decreases_monotonically_past_boundary() {
        let field = DiffuseField { size: Vec3::new(2.0, 2.0, 2.0), falloff: 1.0, ..DiffuseField::new("d", 64) };
        let mut prev = field.box_falloff(Vec3::new(1.0, 0.0, 0.0));
        for i in 1..=10 {
            let x = 1.0 + i as f32 * 0.1;
            let g = field.box_falloff(Vec3::new(x, 0.0, 0.0));
            assert!(g <= prev + 1e-6);
            prev = g;
        }
        assert!(field.box_falloff(Vec3::new(2.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn zero_falloff_is_a_hard_boundary() {
        let field = DiffuseField { size: Vec3::new(2.0, 2.0, 2.0), falloff: 0.0, ..DiffuseField::new("d", 64) };
        assert_eq!(field.box_falloff(Vec3::ZERO), 1.0);
        assert_eq!(field.box_falloff(Vec3::new(2.0, 0.0, 0.0)), 0.0);
    }
}
