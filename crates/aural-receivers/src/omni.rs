//! Single-capsule omnidirectional receiver: the simplest variant, and the
//! baseline every other variant's diffuse decode reduces to for its `W`
//! contribution.

use aural_core::{FoaBuffer, Vec3};

use crate::model::{ReceiverModel, SpeakerChannel};

/// sqrt(2), the inverse of FOA's `W` normalization (spec §4.1 FOA buffer).
const W_TO_OMNI: f32 = core::f32::consts::SQRT_2;

#[derive(Debug, Clone)]
pub struct Omni {
    channels: [SpeakerChannel; 1],
}

impl Omni {
    pub fn new() -> Self {
        Self { channels: [SpeakerChannel::new(Vec3::new(1.0, 0.0, 0.0))] }
    }
}

impl Default for Omni {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiverModel for Omni {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, _prel: Vec3, _angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        for (out, &s) in out_channels[0].iter_mut().zip(audio) {
            *out += s;
        }
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        for (out, &w) in out_channels[0].iter_mut().zip(foa.w()) {
            *out += w * W_TO_OMNI;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointsource_sums_directly_regardless_of_direction() {
        let mut omni = Omni::new();
        let mut out = vec![vec![0.0; 4]];
        omni.add_pointsource(Vec3::new(1.0, 0.0, 0.0), 0.1, &[1.0, 0.5, -0.5, -1.0], &mut out);
        assert_eq!(out[0], vec![1.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn diffuse_decode_reads_only_w() {
        let mut omni = Omni::new();
        let mut foa = FoaBuffer::new(2);
        foa.w_mut().copy_from_slice(&[1.0, -1.0]);
        foa.x_mut().copy_from_slice(&[5.0, 5.0]);
        let mut out = vec![vec![0.0; 2]];
        omni.add_diffuse_sound_field(&foa, &mut out);
        assert!((out[0][0] - W_TO_OMNI).abs() < 1e-5);
        assert!((out[0][1] + W_TO_OMNI).abs() < 1e-5);
    }
}
