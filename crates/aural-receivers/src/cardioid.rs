//! First-order cardioid capsule: `g(θ) = ½(1 + cos θ)` between the source
//! direction and the capsule's look direction.

use aural_core::{FoaBuffer, Vec3};

use crate::model::{ReceiverModel, SpeakerChannel};

const SQRT_2: f32 = core::f32::consts::SQRT_2;

#[derive(Debug, Clone)]
pub struct Cardioid {
    channels: [SpeakerChannel; 1],
}

impl Cardioid {
    pub fn new(look_direction: Vec3) -> Self {
        Self { channels: [SpeakerChannel::new(look_direction)] }
    }
}

impl ReceiverModel for Cardioid {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, prel: Vec3, _angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        let cos_theta = prel.normalized().dot(self.channels[0].direction);
        let g = 0.5 * (1.0 + cos_theta);
        for (out, &s) in out_channels[0].iter_mut().zip(audio) {
            *out += s * g;
        }
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        let dir = self.channels[0].direction;
        for k in 0..foa.len() {
            let dipole = foa.x()[k] * dir.x + foa.y()[k] * dir.y + foa.z()[k] * dir.z;
            out_channels[0][k] += 0.5 * foa.w()[k] * SQRT_2 + 0.5 * dipole;
        }
    }
}
