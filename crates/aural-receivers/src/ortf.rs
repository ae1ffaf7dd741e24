//! ORTF stereo pair: two cardioid capsules splayed ±55° from center.

use aural_core::{FoaBuffer, Vec3};

use crate::cardioid::Cardioid;
use crate::model::{ReceiverModel, SpeakerChannel};

/// The standard ORTF splay angle, in radians.
const ORTF_SPLAY: f32 = 55.0 * core::f32::consts::PI / 180.0;

#[derive(Debug, Clone)]
pub struct Ortf {
    left: Cardioid,
    right: Cardioid,
    channels: [SpeakerChannel; 2],
}

impl Ortf {
    pub fn new() -> Self {
        let left_dir = Vec3::from_spherical(1.0, ORTF_SPLAY, 0.0);
        let right_dir = Vec3::from_spherical(1.0, -ORTF_SPLAY, 0.0);
        Self {
            left: Cardioid::new(left_dir),
            right: Cardioid::new(right_dir),
            channels: [SpeakerChannel::new(left_dir), SpeakerChannel::new(right_dir)],
        }
    }
}

impl Default for Ortf {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiverModel for Ortf {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, prel: Vec3, angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        let (left_out, right_out) = out_channels.split_at_mut(1);
        self.left.add_pointsource(prel, angular_width, audio, left_out);
        self.right.add_pointsource(prel, angular_width, audio, right_out);
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        let (left_out, right_out) = out_channels.split_at_mut(1);
        self.left.add_diffuse_sound_field(foa, left_out);
        self.right.add_diffuse_sound_field(foa, right_out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_panned_to_the_left_favors_left_channel() {
        let mut ortf = Ortf::new();
        let mut out = vec![vec![0.0; 1], vec![0.0; 1]];
        let left_dir = Vec3::from_spherical(1.0, ORTF_SPLAY, 0.0);
        ortf.add_pointsource(left_dir, 0.0, &[1.0], &mut out);
        assert!(out[0][0] > out[1][0]);
    }

    #[test]
    fn on_axis_source_is_symmetric() {
        let mut ortf = Ortf::new();
        let mut out = vec![vec![0.0; 1], vec![0.0; 1]];
        ortf.add_pointsource(Vec3::new(1.0, 0.0, 0.0), 0.0, &[1.0], &mut out);
        assert!((out[0][0] - out[1][0]).abs() < 1e-5);
    }
}
