//! Generic biquad (second-order IIR) filter.
//!
//! Coefficient design uses the RBJ Audio EQ Cookbook formulas. Used directly
//! by reflector material filters and by the shelving stage of the
//! frequency-dependent air absorption model (spec §4.2, §4.4).

use core::f32::consts::PI;
use libm::{cosf, powf, sinf};

/// Second-order IIR filter, Direct Form I:
/// `y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]`.
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Passthrough biquad (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self { b0: 1.0, b1: 0.0, b2: 0.0, a1: 0.0, a2: 0.0, x1: 0.0, x2: 0.0, y1: 0.0, y2: 0.0 }
    }

    /// Sets coefficients, normalizing by `a0` internally.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let inv = 1.0 / a0;
        self.b0 = b0 * inv;
        self.b1 = b1 * inv;
        self.b2 = b2 * inv;
        self.a1 = a1 * inv;
        self.a2 = a2 * inv;
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output =
            self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }

    pub fn process_block(&mut self, samples: &mut [f32]) {
        for s in samples.iter_mut() {
            *s = self.process(*s);
        }
    }

    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Magnitude response at `frequency` Hz, evaluated analytically from the
    /// current coefficients (spec §8's "filter design produces the expected
    /// analytic frequency response").
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let omega = 2.0 * PI * frequency / sample_rate;
        let (cos1, sin1) = (cosf(omega), sinf(omega));
        let (cos2, sin2) = (cosf(2.0 * omega), sinf(2.0 * omega));

        let num_re = self.b0 + self.b1 * cos1 + self.b2 * cos2;
        let num_im = -(self.b1 * sin1 + self.b2 * sin2);
        let den_re = 1.0 + self.a1 * cos1 + self.a2 * cos2;
        let den_im = -(self.a1 * sin1 + self.a2 * sin2);

        let num_mag = libm::sqrtf(num_re * num_re + num_im * num_im);
        let den_mag = libm::sqrtf(den_re * den_re + den_im * den_im);
        num_mag / den_mag
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-pass coefficients, RBJ cookbook: `(b0, b1, b2, a0, a1, a2)`.
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let (cos_omega, sin_omega) = (cosf(omega), sinf(omega));
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;
    (b0, b1, b2, a0, a1, a2)
}

/// High-pass coefficients, RBJ cookbook.
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let (cos_omega, sin_omega) = (cosf(omega), sinf(omega));
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;
    (b0, b1, b2, a0, a1, a2)
}

/// High-shelf coefficients, RBJ cookbook, used for the high-frequency roll-off
/// term of the air absorption model.
pub fn highshelf_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let (cos_omega, sin_omega) = (cosf(omega), sinf(omega));
    let alpha = sin_omega / (2.0 * q);
    let two_sqrt_a_alpha = 2.0 * libm::sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha;
    (b0, b1, b2, a0, a1, a2)
}

/// Peaking EQ coefficients, RBJ cookbook, used for material-fit notch/bump
/// filters.
pub fn peaking_eq_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let (cos_omega, sin_omega) = (cosf(omega), sinf(omega));
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;
    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_is_identity() {
        let mut bq = Biquad::new();
        for i in 0..10 {
            let x = i as f32 * 0.1;
            assert!((bq.process(x) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut bq = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(1000.0, 0.707, 48000.0);
        bq.set_coefficients(b0, b1, b2, a0, a1, a2);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = bq.process(1.0);
        }
        assert!((out - 1.0).abs() < 0.05);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut bq = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(1000.0, 0.707, 48000.0);
        bq.set_coefficients(b0, b1, b2, a0, a1, a2);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = bq.process(1.0);
        }
        assert!(out.abs() < 0.05);
    }

    #[test]
    fn magnitude_at_dc_matches_settled_output() {
        let mut bq = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(500.0, 0.707, 48000.0);
        bq.set_coefficients(b0, b1, b2, a0, a1, a2);
        let analytic = bq.magnitude_at(0.0, 48000.0);
        let mut settled = 0.0;
        for _ in 0..4000 {
            settled = bq.process(1.0);
        }
        assert!((analytic - settled).abs() < 0.02, "{} vs {}", analytic, settled);
    }
}
