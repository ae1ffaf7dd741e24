//! FFT wrapper, used for partitioned convolution and spectral analysis in
//! the non-realtime calibration path. Requires the `std` feature.

use rustfft::num_complex::Complex;
use rustfft::{Fft as RustFft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Cached forward/inverse FFT plan for a fixed transform size.
pub struct Fft {
    planner: FftPlanner<f32>,
    fft: Arc<dyn RustFft<f32>>,
    ifft: Arc<dyn RustFft<f32>>,
    size: usize,
}

impl Fft {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        Self { planner, fft, ifft, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn resize(&mut self, size: usize) {
        if size != self.size {
            self.fft = self.planner.plan_fft_forward(size);
            self.ifft = self.planner.plan_fft_inverse(size);
            self.size = size;
        }
    }

    /// Forward transform of a real, zero-padded-to-`size` input, in-place on
    /// a complex scratch buffer the caller owns.
    pub fn forward_complex(&self, buffer: &mut [Complex<f32>]) {
        self.fft.process(buffer);
    }

    /// Inverse transform, normalized by `1/size`.
    pub fn inverse_complex(&self, buffer: &mut [Complex<f32>]) {
        self.ifft.process(buffer);
        let scale = 1.0 / self.size as f32;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}

/// Raised-cosine analysis windows for spectral magnitude estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Rectangular,
    Hann,
    Hamming,
}

impl Window {
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
                    *sample *= w;
                }
            }
            Window::Hamming => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.54 - 0.46 * (2.0 * PI * i as f32 / n as f32).cos();
                    *sample *= w;
                }
            }
        }
    }
}

/// Magnitude spectrum in dB, floor at -200 dB to avoid `-inf`.
pub fn magnitude_db(spectrum: &[Complex<f32>]) -> Vec<f32> {
    spectrum.iter().map(|c| 20.0 * c.norm().max(1e-10).log10()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_roundtrip_preserves_signal() {
        let fft = Fft::new(256);
        let input: Vec<f32> = (0..256).map(|i| (2.0 * PI * 10.0 * i as f32 / 256.0).sin()).collect();
        let mut buffer: Vec<Complex<f32>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        fft.forward_complex(&mut buffer);
        fft.inverse_complex(&mut buffer);
        for (a, b) in input.iter().zip(buffer.iter()) {
            assert!((a - b.re).abs() < 0.01, "{} vs {}", a, b.re);
        }
    }

    #[test]
    fn hann_window_tapers_to_zero_at_edges() {
        let mut buffer = vec![1.0; 100];
        Window::Hann.apply(&mut buffer);
        assert!(buffer[0] < 0.01);
        assert!(buffer[99] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 0.02);
    }

    #[test]
    fn dc_signal_concentrates_energy_in_bin_zero() {
        let fft = Fft::new(256);
        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(1.0, 0.0); 256];
        fft.forward_complex(&mut buffer);
        let dc_mag = buffer[0].norm();
        let other_mag: f32 = buffer[1..].iter().map(|c| c.norm()).sum();
        assert!(dc_mag > other_mag * 10.0);
    }
}
