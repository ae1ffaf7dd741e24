//! Parametric binaural HRTF: per ear, a Woodworth-Schlosberg interaural time
//! delay plus three cascaded shelving/peaking biquads standing in for
//! head-shadow, pinna-shadow and torso-shadow coloration, and a notch filter
//! for the concha resonance (spec §4.8). This is a closed-form approximation,
//! not a measured-HRIR convolution engine.

use aural_core::{highshelf_coefficients, peaking_eq_coefficients, Biquad, FoaBuffer, Vec3, VariableDelayLine};

use crate::model::{ReceiverModel, SpeakerChannel};

/// Average adult head radius in meters, used by the Woodworth ITD formula.
const HEAD_RADIUS_M: f32 = 0.0875;

/// One ear's signal chain: an interaural delay plus the shadow/resonance
/// filter cascade.
#[derive(Debug, Clone)]
struct Ear {
    delay: VariableDelayLine,
    head_shadow: Biquad,
    pinna_shadow: Biquad,
    torso_shadow: Biquad,
    concha_notch: Biquad,
}

impl Ear {
    fn new(sample_rate: f32) -> Self {
        Self {
            delay: VariableDelayLine::from_time(sample_rate, 0.005),
            head_shadow: Biquad::new(),
            pinna_shadow: Biquad::new(),
            torso_shadow: Biquad::new(),
            concha_notch: Biquad::new(),
        }
    }

    /// Retunes the cascade for an ear whose angle away from the source is
    /// `incidence` radians (0 = facing the source, PI = facing directly
    /// away) and processes one sample.
    fn process(&mut self, sample: f32, delay_samples: f32, incidence: f32, sample_rate: f32) -> f32 {
        let shadow = (incidence / core::f32::consts::PI).clamp(0.0, 1.0);

        let (b0, b1, b2, a0, a1, a2) =
            highshelf_coefficients(3000.0, 0.707, -12.0 * shadow, sample_rate);
        self.head_shadow.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) =
            highshelf_coefficients(8000.0, 0.707, -6.0 * shadow, sample_rate);
        self.pinna_shadow.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) =
            highshelf_coefficients(1200.0, 0.707, -4.0 * shadow, sample_rate);
        self.torso_shadow.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) = peaking_eq_coefficients(10000.0, 4.0, -8.0, sample_rate);
        self.concha_notch.set_coefficients(b0, b1, b2, a0, a1, a2);

        let delayed = self.delay.read_write(sample, delay_samples);
        let shadowed = self.head_shadow.process(delayed);
        let shadowed = self.pinna_shadow.process(shadowed);
        let shadowed = self.torso_shadow.process(shadowed);
        self.concha_notch.process(shadowed)
    }
}

/// Woodworth-Schlosberg interaural time delay, in seconds, for a source at
/// azimuth `az` (0 = front, positive = toward the left ear).
fn woodworth_itd(az: f32, head_radius: f32, speed_of_sound: f32) -> f32 {
    let theta = az.abs().min(core::f32::consts::FRAC_PI_2);
    (head_radius / speed_of_sound) * (theta + libm::sinf(theta))
}

/// Smallest signed angle from `b` to `a`, wrapped into `[-PI, PI]`.
fn angle_diff(a: f32, b: f32) -> f32 {
    libm::atan2f(libm::sinf(a - b), libm::cosf(a - b))
}

#[derive(Debug, Clone)]
pub struct ParametricHrtf {
    left: Ear,
    right: Ear,
    channels: [SpeakerChannel; 2],
    sample_rate: f32,
    speed_of_sound: f32,
}

impl ParametricHrtf {
    pub fn new(sample_rate: f32, speed_of_sound: f32) -> Self {
        Self {
            left: Ear::new(sample_rate),
            right: Ear::new(sample_rate),
            channels: [SpeakerChannel::new(Vec3::new(0.0, 1.0, 0.0)), SpeakerChannel::new(Vec3::new(0.0, -1.0, 0.0))],
            sample_rate,
            speed_of_sound,
        }
    }
}

impl ReceiverModel for ParametricHrtf {
    fn channels(&self) -> &[SpeakerChannel] {
        &self.channels
    }

    fn add_pointsource(&mut self, prel: Vec3, _angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]) {
        let az = prel.azim();
        let itd = woodworth_itd(az, HEAD_RADIUS_M, self.speed_of_sound);
        let itd_samples = (itd * self.sample_rate).max(0.0);

        let (left_delay, right_delay) = if az >= 0.0 { (0.0, itd_samples) } else { (itd_samples, 0.0) };
        let left_incidence = angle_diff(az, core::f32::consts::FRAC_PI_2).abs();
        let right_incidence = angle_diff(az, -core::f32::consts::FRAC_PI_2).abs();

        let (left_out, right_out) = out_channels.split_at_mut(1);
        for (k, &s) in audio.iter().enumerate() {
            left_out[0][k] += self.left.process(s, left_delay, left_incidence, self.sample_rate);
            right_out[0][k] += self.right.process(s, right_delay, right_incidence, self.sample_rate);
        }
    }

    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]) {
        let sqrt_half = aural_core::sqrt_half();
        for k in 0..foa.len() {
            out_channels[0][k] += foa.w()[k] * sqrt_half + 0.5 * foa.y()[k];
            out_channels[1][k] += foa.w()[k] * sqrt_half - 0.5 * foa.y()[k];
        }
    }
}
