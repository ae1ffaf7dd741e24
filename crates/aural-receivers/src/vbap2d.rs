//! 2-D Vector Base Amplitude Panning: a horizontal ring of speakers,
//! amplitude-panned in pairs between the two neighbors bracketing the
//! source azimuth (spec §4.8; the 3-D triangulated variant is not
//! implemented here — see `DESIGN.md`).

use aural_core::{FoaBuffer, Vec3};

use crate::model::{ReceiverModel, SpeakerChannel};

const TAU: f32 = core::f32::consts::TAU;

fn normalize_angle(a: f32) -> f32 {
    let wrapped = a % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[derive(Debug, Clone)]
pub struct Vbap2d {
    channels: Vec<SpeakerChannel>,
}

impl Vbap2d {
    /// Builds a ring decoder from speaker directions (only their azimuth is
    /// used; they are sorted into ascending azimuth order).
    pub fn new(directions: Vec<Vec3>) -> Self {
        let mut channels: Vec<SpeakerChannel> = directions.into_iter().map(SpeakerChannel::new).collect();
        channels.sort_by(|a, b| a.direction.azim().partial_cmp(&b.direction.azim()).unwrap());
        Self { channels }
    }

    /// Finds the bracketing speaker pair `(i, i+1)` for azimuth `az` and the
    /// two (un-normalized) amplitude gains that reconstruct the 2-D target
    /// direction from that pair's unit vectors.
    fn pair_gains(&self, az: f32) -> (usize, usize, f32, f32) {
        let n = self.channels.len();
        let target_az = normalize_angle(az);

        let mut pair = (n - 1, 0);
        for i in 0..n {
            let a0 = normalize_angle(self.channels[i].direction.azim());
            let a1_raw = self.channels[(i + 1) % n].direction.azim();
            let mut a1 = normalize_angle(a1_raw);
            if a1 <= a0 {
                a1 += TAU;
            }
            let mut t = target_az;
            if t < a0 {
                t += TAU;
            }
            if t >= a0 && t <= a1 {
                pair = (i, (i + 1) % n);
                break;
            }
        }

        let (i, j) = pair;
        let d0 = self.channels[i].direction;
        let d1 = self.channels[j].direction;
        let det = d0.x * d1.y - d0.y * d1.x;
        let (tx, ty) = (libm::cosf(az), libm::sinf(az));
        if det.abs() <= 1e-6 {
            return (i, j, 1.0, 0.0);
        }
        let g0 = (tx * d1.y - ty * d1.x) / det;
        let g1 = (d0.x * ty - d0.y * tx) / det;
        let norm = (g0 * g0 + g1 * g1).sqrt().max(1e-6);
        (i, j, g0 / norm, g1 / norm)
    }
}

impl ReceiverModel for Vbap2d {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, prel: Vec3, _angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        let az = prel.azim();
        let (i, j, g0, g1) = self.pair_gains(az);
        for (k, &s) in audio.iter().enumerate() {
            out_channels[i][k] += s * g0;
            if j != i {
                out_channels[j][k] += s * g1;
            }
        }
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        let n = self.channels.len().max(1);
        let share = 1.0 / (n as f32).sqrt();
        for ch in out_channels.iter_mut() {
            for (out, &w) in ch.iter_mut().zip(foa.w()) {
                *out += w * core::f32::consts::SQRT_2 * share;
            }
        }
    }
}
