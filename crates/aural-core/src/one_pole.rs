//! One-pole lowpass filter.
//!
//! `y[n] = (1 - coeff) * x[n] + coeff * y[n-1]`, `coeff = exp(-2*pi*f/fs)`.
//! Used for the frequency-independent term of reflector material fits and
//! as the smoothing core behind [`crate::param`].

use libm::expf;

/// Single-pole (6 dB/oct) lowpass filter.
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    freq: f32,
}

impl OnePole {
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut filter = Self { state: 0.0, coeff: 0.0, sample_rate, freq: freq_hz };
        filter.recalculate_coeff();
        filter
    }

    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.freq = freq_hz;
        self.recalculate_coeff();
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state += self.coeff * (input - self.state);
        if self.state.abs() < 1e-20 {
            self.state = 0.0;
        }
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    fn recalculate_coeff(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.freq / self.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut lp = OnePole::new(48000.0, 1000.0);
        let mut out = 0.0;
        for _ in 0..48000 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-4);
    }

    #[test]
    fn attenuates_nyquist() {
        let mut lp = OnePole::new(48000.0, 100.0);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input).abs();
        }
        assert!(sum / 4800.0 < 0.05);
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::new(48000.0, 1000.0);
        lp.process(1.0);
        lp.reset();
        assert_eq!(lp.process(0.0), 0.0);
    }
}
