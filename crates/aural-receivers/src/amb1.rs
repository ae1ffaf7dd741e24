//! First-order ambisonic passthrough: the receiver's "channels" are the
//! B-format components themselves (`W`, `Y`, `Z`, `X`) rather than
//! loudspeaker feeds. Downstream decoding (ALLRAD, HOA, or a plain stereo
//! decode) is left to whatever consumes the recorded channels.

use aural_core::{sqrt_half, FoaBuffer, Vec3};

use crate::model::{ReceiverModel, SpeakerChannel};

#[derive(Debug, Clone)]
pub struct Amb1 {
    channels: [SpeakerChannel; 4],
}

impl Amb1 {
    pub fn new() -> Self {
        Self { channels: [SpeakerChannel::new(Vec3::ZERO); 4] }
    }
}

impl Default for Amb1 {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiverModel for Amb1 {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, prel: Vec3, _angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        let dir = prel.normalized();
        let w_gain = sqrt_half();
        for (k, &s) in audio.iter().enumerate() {
            out_channels[0][k] += s * w_gain;
            out_channels[1][k] += s * dir.y;
            out_channels[2][k] += s * dir.z;
            out_channels[3][k] += s * dir.x;
        }
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        for k in 0..foa.len() {
            out_channels[0][k] += foa.w()[k];
            out_channels[1][k] += foa.y()[k];
            out_channels[2][k] += foa.z()[k];
            out_channels[3][k] += foa.x()[k];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointsource_on_y_axis_lands_entirely_in_the_y_channel() {
        let mut amb = Amb1::new();
        let mut out = vec![vec![0.0; 1]; 4];
        amb.add_pointsource(Vec3::new(0.0, 1.0, 0.0), 0.0, &[1.0], &mut out);
        assert!((out[1][0] - 1.0).abs() < 1e-5);
        assert!(out[2][0].abs() < 1e-5);
        assert!(out[3][0].abs() < 1e-5);
        assert!((out[0][0] - sqrt_half()).abs() < 1e-5);
    }

    #[test]
    fn diffuse_field_channels_pass_through_unchanged() {
        let mut amb = Amb1::new();
        let mut foa = FoaBuffer::new(2);
        foa.w_mut().copy_from_slice(&[1.0, 2.0]);
        foa.y_mut().copy_from_slice(&[0.5, -0.5]);
        let mut out = vec![vec![0.0; 2]; 4];
        amb.add_diffuse_sound_field(&foa, &mut out);
        assert_eq!(out[0], vec![1.0, 2.0]);
        assert_eq!(out[1], vec![0.5, -0.5]);
    }
}
