//! Mono audio buffer with level measurement and the common scalar/buffer-wise
//! arithmetic used throughout the per-block DSP.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use libm::{log10f, sqrtf};

/// Reference pressure for dB-SPL conversions, `2e-5` Pa.
pub const SPL_REFERENCE: f32 = 2e-5;

/// An owned, fixed-size mono audio block.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<f32>,
}

impl AudioBuffer {
    pub fn new(size: usize) -> Self {
        Self { samples: vec![0.0; size] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn clear(&mut self) {
        self.samples.fill(0.0);
    }

    pub fn fill_with(&mut self, value: f32) {
        self.samples.fill(value);
    }

    /// Mean-square value over the buffer (0 for an empty buffer).
    pub fn mean_square(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.samples.iter().map(|s| s * s).sum();
        sum / self.samples.len() as f32
    }

    pub fn rms(&self) -> f32 {
        sqrtf(self.mean_square())
    }

    /// Peak absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// RMS expressed in dB relative to [`SPL_REFERENCE`].
    pub fn rms_db_spl(&self) -> f32 {
        linear_to_db_spl(self.rms())
    }

    /// Peak expressed in dB relative to [`SPL_REFERENCE`].
    pub fn peak_db_spl(&self) -> f32 {
        linear_to_db_spl(self.peak())
    }

    pub fn scale(&mut self, gain: f32) {
        for s in &mut self.samples {
            *s *= gain;
        }
    }

    pub fn add_scaled(&mut self, other: &AudioBuffer, gain: f32) {
        debug_assert_eq!(self.samples.len(), other.samples.len());
        for (s, o) in self.samples.iter_mut().zip(other.samples.iter()) {
            *s += o * gain;
        }
    }

    pub fn add(&mut self, other: &AudioBuffer) {
        self.add_scaled(other, 1.0);
    }

    pub fn copy_from(&mut self, other: &AudioBuffer) {
        self.samples.copy_from_slice(&other.samples);
    }

    /// Appends `input`, treating `self` as a ring: shifts existing content
    /// left by `input.len()` and writes `input` into the freed tail. Used
    /// for streaming buffers shorter than the logical signal they represent.
    pub fn append_ring(&mut self, input: &[f32]) {
        let n = input.len();
        let len = self.samples.len();
        if n >= len {
            let start = n - len;
            self.samples.copy_from_slice(&input[start..]);
            return;
        }
        self.samples.copy_within(n.., 0);
        self.samples[len - n..].copy_from_slice(input);
    }
}

impl core::ops::Index<usize> for AudioBuffer {
    type Output = f32;
    fn index(&self, idx: usize) -> &f32 {
        &self.samples[idx]
    }
}

impl core::ops::IndexMut<usize> for AudioBuffer {
    fn index_mut(&mut self, idx: usize) -> &mut f32 {
        &mut self.samples[idx]
    }
}

/// Converts a linear amplitude to dB relative to [`SPL_REFERENCE`].
pub fn linear_to_db_spl(linear: f32) -> f32 {
    20.0 * log10f((linear / SPL_REFERENCE).max(1e-12))
}

/// Converts a dB-SPL value back to a linear amplitude.
pub fn db_spl_to_linear(db: f32) -> f32 {
    SPL_REFERENCE * libm::powf(10.0, db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_unit_dc_is_one() {
        let mut buf = AudioBuffer::new(100);
        buf.fill_with(1.0);
        assert!((buf.rms() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn peak_tracks_absolute_max() {
        let mut buf = AudioBuffer::new(4);
        buf.as_mut_slice().copy_from_slice(&[0.1, -0.9, 0.3, 0.2]);
        assert!((buf.peak() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn append_ring_shifts_and_writes_tail() {
        let mut buf = AudioBuffer::new(4);
        buf.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        buf.append_ring(&[5.0, 6.0]);
        assert_eq!(buf.as_slice(), &[3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn db_spl_round_trip() {
        let linear = 0.05f32;
        let db = linear_to_db_spl(linear);
        let back = db_spl_to_linear(db);
        assert!((back - linear).abs() / linear < 1e-4);
    }
}
